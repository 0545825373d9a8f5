//! Session-scoped generation state shared by independent consumers.
//!
//! [`SessionStore`] holds the stories fetched from the tracker, the selected
//! story, the uploaded file context, the generated test cases, and the
//! generating flag. Consumers receive the store by reference (usually an
//! `Rc<SessionStore>`) and use the typed getter/setter pairs.
//!
//! Each setter commits one field and then notifies that field's
//! subscribers synchronously, so a subscriber always observes the committed
//! value. There is no cross-field transaction: a consumer reading two fields
//! in sequence may see one updated and the other not yet.
//!
//! The store uses interior mutability without locking and is neither `Send`
//! nor `Sync`; all mutation happens on the thread that owns it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::models::{FileContext, TestCase, UserStory};

/// Fields of the session that can be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionField {
    /// Stories fetched from the tracker.
    UserStories,
    /// The story chosen for generation.
    SelectedStory,
    /// The uploaded file context.
    FileContext,
    /// The generated test cases.
    TestScripts,
    /// Whether a generation request is in flight.
    IsGenerating,
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&SessionStore, SessionField)>;

struct Subscriber {
    id: SubscriptionId,
    field: SessionField,
    listener: Listener,
}

/// Shared generation state for one session.
#[derive(Default)]
pub struct SessionStore {
    user_stories: RefCell<Vec<UserStory>>,
    selected_story: RefCell<Option<UserStory>>,
    file_context: RefCell<Option<FileContext>>,
    test_scripts: RefCell<Vec<TestCase>>,
    test_scripts_revision: Cell<u64>,
    is_generating: Cell<bool>,
    subscribers: RefCell<Vec<Subscriber>>,
    next_subscription: Cell<u64>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionStore")
            .field("user_stories", &self.user_stories.borrow().len())
            .field("selected_story", &self.selected_story_key())
            .field("file_context", &self.file_context.borrow().is_some())
            .field("test_scripts", &self.test_scripts.borrow().len())
            .field("is_generating", &self.is_generating.get())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates an empty store wrapped for sharing.
    #[must_use]
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Stories fetched from the tracker.
    #[must_use]
    pub fn user_stories(&self) -> Vec<UserStory> {
        self.user_stories.borrow().clone()
    }

    /// Finds a fetched story by key.
    #[must_use]
    pub fn find_story(&self, key: &str) -> Option<UserStory> {
        self.user_stories
            .borrow()
            .iter()
            .find(|story| story.key == key)
            .cloned()
    }

    /// Replaces the fetched stories.
    pub fn set_user_stories(&self, stories: Vec<UserStory>) {
        *self.user_stories.borrow_mut() = stories;
        self.notify(SessionField::UserStories);
    }

    /// The story chosen for generation, if any.
    #[must_use]
    pub fn selected_story(&self) -> Option<UserStory> {
        self.selected_story.borrow().clone()
    }

    /// Key of the selected story, if any.
    #[must_use]
    pub fn selected_story_key(&self) -> Option<String> {
        self.selected_story
            .borrow()
            .as_ref()
            .map(|story| story.key.clone())
    }

    /// Replaces the selected story.
    pub fn set_selected_story(&self, story: Option<UserStory>) {
        *self.selected_story.borrow_mut() = story;
        self.notify(SessionField::SelectedStory);
    }

    /// The uploaded file context, if any.
    #[must_use]
    pub fn file_context(&self) -> Option<FileContext> {
        self.file_context.borrow().clone()
    }

    /// Returns true when a file context is attached.
    #[must_use]
    pub fn has_file_context(&self) -> bool {
        self.file_context.borrow().is_some()
    }

    /// Replaces the file context.
    pub fn set_file_context(&self, context: Option<FileContext>) {
        *self.file_context.borrow_mut() = context;
        self.notify(SessionField::FileContext);
    }

    /// The generated test cases.
    #[must_use]
    pub fn test_scripts(&self) -> Vec<TestCase> {
        self.test_scripts.borrow().clone()
    }

    /// Number of generated test cases.
    #[must_use]
    pub fn test_script_count(&self) -> usize {
        self.test_scripts.borrow().len()
    }

    /// Runs `read` against the generated test cases without cloning them.
    pub fn with_test_scripts<R>(&self, read: impl FnOnce(&[TestCase]) -> R) -> R {
        read(&self.test_scripts.borrow())
    }

    /// Counter bumped each time the test cases are replaced.
    #[must_use]
    pub fn test_scripts_revision(&self) -> u64 {
        self.test_scripts_revision.get()
    }

    /// Replaces the generated test cases wholesale.
    pub fn set_test_scripts(&self, scripts: Vec<TestCase>) {
        *self.test_scripts.borrow_mut() = scripts;
        self.test_scripts_revision
            .set(self.test_scripts_revision.get().wrapping_add(1));
        self.notify(SessionField::TestScripts);
    }

    /// Whether a generation request is in flight.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.is_generating.get()
    }

    /// Sets the generating flag.
    pub fn set_generating(&self, generating: bool) {
        self.is_generating.set(generating);
        self.notify(SessionField::IsGenerating);
    }

    /// Registers `listener` for changes to `field`.
    ///
    /// The listener runs after every write to the field, including writes
    /// of an unchanged value.
    pub fn subscribe(
        &self,
        field: SessionField,
        listener: impl Fn(&Self, SessionField) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0.wrapping_add(1));
        self.subscribers.borrow_mut().push(Subscriber {
            id,
            field,
            listener: Rc::new(listener),
        });
        id
    }

    /// Removes a subscription; returns false when it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|subscriber| subscriber.id != id);
        subscribers.len() != before
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self, field: SessionField) {
        // Listeners may read the store or (un)subscribe, so the list is
        // snapshotted before any of them runs.
        let listeners: Vec<Listener> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|subscriber| subscriber.field == field)
            .map(|subscriber| Rc::clone(&subscriber.listener))
            .collect();

        for listener in listeners {
            listener(self, field);
        }
    }
}
