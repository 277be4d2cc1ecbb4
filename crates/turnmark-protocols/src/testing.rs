//! In-memory fakes for exercising the engine without a browser.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use parking_lot::Mutex;

use crate::error::PageError;
use crate::page::{ElementHandle, ElementQuery, PageContext, PageLocation, ScrollOptions};
use crate::scheduler::Scheduler;

/// A fake page that records every mutation.
pub struct FakePage {
    state: Mutex<FakePageState>,
}

#[derive(Default)]
struct FakePageState {
    location: Option<PageLocation>,
    elements: HashMap<ElementQuery, HashMap<String, String>>,
    /// Elements that appear once they have been looked up this many times.
    pending: HashMap<ElementQuery, usize>,
    lookups: HashMap<ElementQuery, usize>,
    assignments: Vec<String>,
    pushed: Vec<String>,
    scrolls: Vec<(ElementQuery, ScrollOptions)>,
    style_writes: Vec<(ElementQuery, String, String)>,
    failing: HashSet<&'static str>,
}

impl FakePage {
    /// A page whose location is `href`.
    ///
    /// # Panics
    ///
    /// Panics if `href` is not an absolute URL.
    pub fn at(href: &str) -> Self {
        let location = PageLocation::parse(href).unwrap_or_else(|e| panic!("bad href {href}: {e}"));
        Self {
            state: Mutex::new(FakePageState {
                location: Some(location),
                ..Default::default()
            }),
        }
    }

    /// Add an element with no inline styles.
    pub fn insert(&self, query: ElementQuery) {
        self.insert_with_styles(query, &[]);
    }

    /// Add an element carrying inline styles.
    pub fn insert_with_styles(&self, query: ElementQuery, styles: &[(&str, &str)]) {
        let styles = styles
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self.state.lock().elements.insert(query, styles);
    }

    /// Make an element appear on its `lookups`-th lookup.
    pub fn insert_after(&self, query: ElementQuery, lookups: usize) {
        self.state.lock().pending.insert(query, lookups);
    }

    /// Make one operation fail with a transport error.
    ///
    /// Recognised names: `location`, `assign`, `push_state`, `find`,
    /// `scroll_into_view`, `style_property`, `set_style_property`.
    pub fn fail_on(&self, operation: &'static str) {
        self.state.lock().failing.insert(operation);
    }

    /// Replace the location without recording an assignment, as a load the
    /// page did not ask for would.
    ///
    /// # Panics
    ///
    /// Panics if `href` is not an absolute URL.
    pub fn set_location(&self, href: &str) {
        let location = PageLocation::parse(href).unwrap_or_else(|e| panic!("bad href {href}: {e}"));
        self.state.lock().location = Some(location);
    }

    pub fn location_now(&self) -> Option<PageLocation> {
        self.state.lock().location.clone()
    }

    /// Raw hrefs passed to `assign`, in order.
    pub fn assignments(&self) -> Vec<String> {
        self.state.lock().assignments.clone()
    }

    /// Paths passed to `push_state`, in order.
    pub fn pushed_paths(&self) -> Vec<String> {
        self.state.lock().pushed.clone()
    }

    pub fn scrolls(&self) -> Vec<(ElementQuery, ScrollOptions)> {
        self.state.lock().scrolls.clone()
    }

    pub fn style_writes(&self) -> Vec<(ElementQuery, String, String)> {
        self.state.lock().style_writes.clone()
    }

    pub fn lookup_count(&self, query: &ElementQuery) -> usize {
        self.state.lock().lookups.get(query).copied().unwrap_or(0)
    }

    /// Current inline style value (empty when unset or element missing).
    pub fn style(&self, query: &ElementQuery, property: &str) -> String {
        self.state
            .lock()
            .elements
            .get(query)
            .and_then(|styles| styles.get(property).cloned())
            .unwrap_or_default()
    }

    fn check(&self, operation: &'static str) -> Result<(), PageError> {
        if self.state.lock().failing.contains(operation) {
            return Err(PageError::Transport(format!("{operation} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl PageContext for FakePage {
    async fn location(&self) -> Result<PageLocation, PageError> {
        self.check("location")?;
        self.state.lock().location.clone().ok_or(PageError::Closed)
    }

    async fn assign(&self, href: &str) -> Result<(), PageError> {
        self.check("assign")?;
        let mut state = self.state.lock();
        state.assignments.push(href.to_string());
        let next = match &state.location {
            Some(current) => current.resolve(href)?,
            None => PageLocation::parse(href)?,
        };
        state.location = Some(next);
        Ok(())
    }

    async fn push_state(&self, path: &str) -> Result<(), PageError> {
        self.check("push_state")?;
        let mut state = self.state.lock();
        state.pushed.push(path.to_string());
        let current = state.location.clone().ok_or(PageError::Closed)?;
        state.location = Some(current.resolve(path)?);
        Ok(())
    }

    async fn find(&self, query: &ElementQuery) -> Result<Option<ElementHandle>, PageError> {
        self.check("find")?;
        let mut state = self.state.lock();
        let count = {
            let count = state.lookups.entry(query.clone()).or_insert(0);
            *count += 1;
            *count
        };
        if state.pending.get(query).is_some_and(|after| count >= *after) {
            state.pending.remove(query);
            state.elements.insert(query.clone(), HashMap::new());
        }
        Ok(state
            .elements
            .contains_key(query)
            .then(|| ElementHandle::new(query.clone())))
    }

    async fn scroll_into_view(
        &self,
        element: &ElementHandle,
        options: ScrollOptions,
    ) -> Result<(), PageError> {
        self.check("scroll_into_view")?;
        self.state
            .lock()
            .scrolls
            .push((element.query().clone(), options));
        Ok(())
    }

    async fn style_property(
        &self,
        element: &ElementHandle,
        property: &str,
    ) -> Result<String, PageError> {
        self.check("style_property")?;
        Ok(self.style(element.query(), property))
    }

    async fn set_style_property(
        &self,
        element: &ElementHandle,
        property: &str,
        value: &str,
    ) -> Result<(), PageError> {
        self.check("set_style_property")?;
        let mut state = self.state.lock();
        state
            .style_writes
            .push((element.query().clone(), property.to_string(), value.to_string()));
        if let Some(styles) = state.elements.get_mut(element.query()) {
            if value.is_empty() {
                styles.remove(property);
            } else {
                styles.insert(property.to_string(), value.to_string());
            }
        }
        Ok(())
    }
}

/// A scheduler that returns from `sleep` immediately and queues spawned
/// tasks until [`RecordingScheduler::run_spawned`] is awaited.
#[derive(Default)]
pub struct RecordingScheduler {
    sleeps: Mutex<Vec<Duration>>,
    spawned: Mutex<Vec<BoxFuture<'static, ()>>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every duration passed to `sleep`, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }

    /// Number of tasks waiting to run.
    pub fn pending_tasks(&self) -> usize {
        self.spawned.lock().len()
    }

    /// Drive every queued task to completion.
    pub async fn run_spawned(&self) {
        loop {
            let tasks: Vec<_> = std::mem::take(&mut *self.spawned.lock());
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                task.await;
            }
        }
    }
}

#[async_trait]
impl Scheduler for RecordingScheduler {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        tokio::task::yield_now().await;
    }

    fn spawn(&self, task: BoxFuture<'static, ()>) {
        self.spawned.lock().push(task);
    }
}
