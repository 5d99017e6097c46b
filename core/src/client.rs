//! Stateful todo client: a local cache kept in lockstep with the server.
//!
//! # Design
//! `TodoClient` owns the cached items and the current `Filter`. Every
//! mutating operation is one request/response round-trip; the cache is only
//! touched after the server reported success, then the `View` is redrawn.
//!
//! Failures never leave an operation. They are logged at `error` level and
//! the cache stays as it was, so a failed action is simply not reflected.
//! There are no retries.
//!
//! Operations take `&mut self`, so a second operation cannot start while
//! another one is waiting on the network.

use tracing::{debug, error};

use crate::api::TodoApi;
use crate::error::ApiError;
use crate::filter::Filter;
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};
use crate::view::View;

pub struct TodoClient<T, V> {
    api: TodoApi,
    transport: T,
    view: V,
    todos: Vec<Todo>,
    filter: Filter,
}

impl<T: Transport, V: View> TodoClient<T, V> {
    /// An empty client showing every item. Call `load` to fill the cache.
    pub fn new(api: TodoApi, transport: T, view: V) -> Self {
        Self {
            api,
            transport,
            view,
            todos: Vec::new(),
            filter: Filter::All,
        }
    }

    pub fn items(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Replace the whole cache with the server's collection.
    pub async fn load(&mut self) {
        let result = async {
            let response = self.transport.execute(self.api.build_list_todos()).await?;
            self.api.parse_list_todos(response)
        }
        .await;

        match result {
            Ok(todos) => {
                debug!(count = todos.len(), "loaded todos");
                self.todos = todos;
                self.render();
                self.update_summary();
            }
            Err(err) => error!(error = %err, "error loading todos"),
        }
    }

    /// Create an item from `text`. Blank input is ignored without a request.
    pub async fn create(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let input = CreateTodo {
            text: text.to_string(),
        };

        let result = async {
            let request = self.api.build_create_todo(&input)?;
            let response = self.transport.execute(request).await?;
            self.api.parse_create_todo(response)
        }
        .await;

        match result {
            Ok(todo) => {
                debug!(id = %todo.id, "created todo");
                self.todos.push(todo);
                self.view.clear_input();
                self.render();
                self.update_summary();
            }
            Err(err) => error!(error = %err, "error adding todo"),
        }
    }

    /// Create an item from whatever the view's input field holds.
    pub async fn submit_input(&mut self) {
        let text = self.view.pending_input();
        self.create(&text).await;
    }

    /// Flip `completed` on the server, then locally. Unknown ids are ignored.
    pub async fn toggle(&mut self, id: &TodoId) {
        let Some(completed) = self.find(id).map(|todo| todo.completed) else {
            return;
        };

        match self.send_update(id, &UpdateTodo::completed(!completed)).await {
            Ok(()) => {
                if let Some(todo) = self.find_mut(id) {
                    todo.completed = !todo.completed;
                }
                self.render();
                self.update_summary();
            }
            Err(err) => error!(%id, error = %err, "error toggling todo"),
        }
    }

    /// Store `new_text` as given, with no trimming or validation.
    ///
    /// The list is not redrawn: the surface already shows the edited text.
    pub async fn rename(&mut self, id: &TodoId, new_text: &str) {
        match self.send_update(id, &UpdateTodo::text(new_text)).await {
            Ok(()) => {
                if let Some(todo) = self.find_mut(id) {
                    todo.text = new_text.to_string();
                }
            }
            Err(err) => error!(%id, error = %err, "error updating todo"),
        }
    }

    /// Finish an in-place edit: trim what the user typed and rename.
    pub async fn commit_edit(&mut self, id: &TodoId, raw: &str) {
        self.rename(id, raw.trim()).await;
    }

    pub async fn remove(&mut self, id: &TodoId) {
        let result = async {
            let response = self.transport.execute(self.api.build_delete_todo(id)).await?;
            self.api.parse_delete_todo(response)
        }
        .await;

        match result {
            Ok(()) => {
                self.todos.retain(|todo| &todo.id != id);
                self.render();
                self.update_summary();
            }
            Err(err) => error!(%id, error = %err, "error deleting todo"),
        }
    }

    /// Delete every item that is completed right now, one request at a time.
    ///
    /// The set of items is fixed before the first request. A failed delete
    /// is logged by `remove` and the batch carries on.
    pub async fn clear_completed(&mut self) {
        let completed: Vec<TodoId> = self
            .todos
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| todo.id.clone())
            .collect();

        debug!(count = completed.len(), "clearing completed todos");
        for id in &completed {
            self.remove(id).await;
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.view.mark_active_filter(filter);
        self.render();
    }

    /// `set_filter` for a filter control's tag; unknown tags select `All`.
    pub fn set_filter_name(&mut self, name: &str) {
        self.set_filter(Filter::from_name(name));
    }

    /// Cached items passing the current filter, in cache order.
    pub fn filtered_view(&self) -> Vec<Todo> {
        self.todos
            .iter()
            .filter(|todo| self.filter.matches(todo))
            .cloned()
            .collect()
    }

    pub fn render(&mut self) {
        let items = self.filtered_view();
        self.view.render_items(&items);
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// "N items left", singular only for exactly one.
    pub fn summary(&self) -> String {
        format_summary(self.active_count())
    }

    pub fn update_summary(&mut self) {
        let text = self.summary();
        self.view.set_count_text(&text);
    }

    fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    fn find_mut(&mut self, id: &TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| &todo.id == id)
    }

    async fn send_update(&self, id: &TodoId, input: &UpdateTodo) -> Result<(), ApiError> {
        let request = self.api.build_update_todo(id, input)?;
        let response = self.transport.execute(request).await?;
        self.api.parse_update_todo(response)
    }
}

pub fn format_summary(active: usize) -> String {
    let plural = if active == 1 { "" } else { "s" };
    format!("{active} item{plural} left")
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Answers requests from a script and records every request it saw.
    /// An exhausted script behaves like an unreachable server.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn reply(self, status: u16, body: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(HttpResponse::new(status, body)));
            self
        }

        fn fail(self) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(ApiError::Transport("connection refused".to_string())));
            self
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
        }
    }

    #[derive(Default)]
    struct RecordingView {
        input: String,
        inputs_cleared: usize,
        renders: Vec<Vec<Todo>>,
        active_filter: Option<Filter>,
        count_text: String,
    }

    impl View for RecordingView {
        fn pending_input(&self) -> String {
            self.input.clone()
        }

        fn clear_input(&mut self) {
            self.input.clear();
            self.inputs_cleared += 1;
        }

        fn render_items(&mut self, items: &[Todo]) {
            self.renders.push(items.to_vec());
        }

        fn mark_active_filter(&mut self, filter: Filter) {
            self.active_filter = Some(filter);
        }

        fn set_count_text(&mut self, text: &str) {
            self.count_text = text.to_string();
        }
    }

    const TWO_ITEMS: &str =
        r#"[{"id":1,"text":"a","completed":false},{"id":2,"text":"b","completed":true}]"#;

    fn client(transport: ScriptedTransport) -> TodoClient<ScriptedTransport, RecordingView> {
        TodoClient::new(
            TodoApi::new("http://localhost:3000"),
            transport,
            RecordingView::default(),
        )
    }

    /// A client whose cache was loaded from `list`, with `then` scripted next.
    async fn loaded(
        list: &str,
        then: impl FnOnce(ScriptedTransport) -> ScriptedTransport,
    ) -> TodoClient<ScriptedTransport, RecordingView> {
        let mut c = client(then(ScriptedTransport::default().reply(200, list)));
        c.load().await;
        c
    }

    fn ids(todos: &[Todo]) -> Vec<TodoId> {
        todos.iter().map(|todo| todo.id.clone()).collect()
    }

    #[tokio::test]
    async fn load_replaces_cache_and_renders() {
        let c = loaded(TWO_ITEMS, |t| t).await;
        assert_eq!(ids(c.items()), vec![TodoId::from(1), TodoId::from(2)]);
        assert_eq!(c.view().renders.len(), 1);
        assert_eq!(c.view().count_text, "1 item left");
    }

    #[tokio::test]
    async fn load_empty_collection() {
        let c = loaded("[]", |t| t).await;
        assert!(c.filtered_view().is_empty());
        assert_eq!(c.summary(), "0 items left");
        assert_eq!(c.view().count_text, "0 items left");
    }

    #[tokio::test]
    async fn load_accepts_any_json_number_id() {
        let list = r#"[{"id":-1,"text":"a","completed":false},{"id":2.5,"text":"b","completed":false}]"#;
        let mut c = loaded(list, |t| t.reply(200, "")).await;
        assert_eq!(c.items().len(), 2);

        let id = c.items()[0].id.clone();
        c.toggle(&id).await;
        assert!(c.items()[0].completed);
        let requests = c.transport().requests();
        assert_eq!(requests[1].url, "http://localhost:3000/api/todos/-1");
    }

    #[tokio::test]
    async fn failed_load_keeps_stale_cache() {
        let mut c = loaded(TWO_ITEMS, |t| t.fail().reply(500, "boom")).await;
        c.load().await;
        c.load().await;
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.view().renders.len(), 1);
    }

    #[tokio::test]
    async fn create_appends_server_item_and_clears_input() {
        let mut c = loaded(TWO_ITEMS, |t| {
            t.reply(201, r#"{"id":3,"text":"milk","completed":false}"#)
        })
        .await;
        c.view_mut().input = "  milk ".to_string();
        c.submit_input().await;

        let last = c.items().last().unwrap();
        assert_eq!(last.id, TodoId::from(3));
        assert_eq!(last.text, "milk");
        assert!(c.view().input.is_empty());
        assert_eq!(c.view().count_text, "2 items left");

        let requests = c.transport().requests();
        let sent = &requests[1];
        assert_eq!(sent.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"text": "milk"}));
    }

    #[tokio::test]
    async fn blank_create_sends_nothing() {
        let mut c = loaded(TWO_ITEMS, |t| t).await;
        c.create("").await;
        c.create("   ").await;
        assert_eq!(c.transport().requests().len(), 1);
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.view().inputs_cleared, 0);
    }

    #[tokio::test]
    async fn failed_create_leaves_cache_and_input() {
        let mut c = loaded(TWO_ITEMS, |t| t.reply(500, "nope")).await;
        c.view_mut().input = "x".to_string();
        c.submit_input().await;
        assert_eq!(c.items().len(), 2);
        assert_eq!(c.view().input, "x");
    }

    #[tokio::test]
    async fn toggle_flips_flag_after_success() {
        let mut c = loaded(TWO_ITEMS, |t| t.reply(200, "{}")).await;
        c.toggle(&TodoId::from(1)).await;
        assert!(c.items()[0].completed);
        assert_eq!(c.view().count_text, "0 items left");

        let requests = c.transport().requests();
        let sent = &requests[1];
        assert_eq!(sent.method, HttpMethod::Put);
        assert!(sent.url.ends_with("/api/todos/1"));
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"completed": true}));
    }

    #[tokio::test]
    async fn failed_toggle_keeps_flag() {
        let mut c = loaded(TWO_ITEMS, |t| t.fail()).await;
        c.toggle(&TodoId::from(2)).await;
        assert!(c.items()[1].completed);
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_a_no_op() {
        let mut c = loaded(TWO_ITEMS, |t| t).await;
        c.toggle(&TodoId::from(99)).await;
        assert_eq!(c.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn rename_stores_text_verbatim_without_rendering() {
        let mut c = loaded(TWO_ITEMS, |t| t.reply(200, "")).await;
        c.rename(&TodoId::from(1), "  spaced ").await;
        assert_eq!(c.items()[0].text, "  spaced ");
        assert_eq!(c.view().renders.len(), 1);
    }

    #[tokio::test]
    async fn rename_allows_empty_text() {
        let mut c = loaded(TWO_ITEMS, |t| t.reply(200, "")).await;
        c.commit_edit(&TodoId::from(1), "   ").await;
        assert_eq!(c.items()[0].text, "");
    }

    #[tokio::test]
    async fn commit_edit_trims_before_sending() {
        let mut c = loaded(TWO_ITEMS, |t| t.reply(200, "")).await;
        c.commit_edit(&TodoId::from(2), " b2 ").await;
        assert_eq!(c.items()[1].text, "b2");
        let requests = c.transport().requests();
        let sent = &requests[1];
        assert_eq!(sent.body.as_deref(), Some(r#"{"text":"b2"}"#));
    }

    #[tokio::test]
    async fn failed_rename_keeps_text() {
        let mut c = loaded(TWO_ITEMS, |t| t.reply(404, "")).await;
        c.rename(&TodoId::from(1), "changed").await;
        assert_eq!(c.items()[0].text, "a");
    }

    #[tokio::test]
    async fn remove_drops_exactly_one_item() {
        let mut c = loaded(TWO_ITEMS, |t| t.reply(204, "")).await;
        c.remove(&TodoId::from(1)).await;
        assert_eq!(ids(c.items()), vec![TodoId::from(2)]);
        assert_eq!(c.view().count_text, "0 items left");
    }

    #[tokio::test]
    async fn failed_remove_keeps_item() {
        let mut c = loaded(TWO_ITEMS, |t| t.reply(500, "")).await;
        c.remove(&TodoId::from(1)).await;
        assert_eq!(c.items().len(), 2);
    }

    #[tokio::test]
    async fn clear_completed_survives_individual_failures() {
        let list = r#"[
            {"id":1,"text":"a","completed":true},
            {"id":2,"text":"b","completed":false},
            {"id":3,"text":"c","completed":true},
            {"id":4,"text":"d","completed":true}
        ]"#;
        let mut c = loaded(list, |t| t.reply(204, "").fail().reply(204, "")).await;
        c.clear_completed().await;

        let deletes: Vec<String> = c
            .transport()
            .requests()
            .into_iter()
            .filter(|req| req.method == HttpMethod::Delete)
            .map(|req| req.url)
            .collect();
        assert_eq!(
            deletes,
            vec![
                "http://localhost:3000/api/todos/1",
                "http://localhost:3000/api/todos/3",
                "http://localhost:3000/api/todos/4",
            ]
        );
        assert_eq!(ids(c.items()), vec![TodoId::from(2), TodoId::from(3)]);
    }

    #[tokio::test]
    async fn clear_completed_without_completed_items_sends_nothing() {
        let mut c = loaded(r#"[{"id":1,"text":"a","completed":false}]"#, |t| t).await;
        c.clear_completed().await;
        assert_eq!(c.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn filters_select_matching_items_in_order() {
        let mut c = loaded(TWO_ITEMS, |t| t).await;

        c.set_filter_name("completed");
        assert_eq!(ids(&c.filtered_view()), vec![TodoId::from(2)]);
        assert_eq!(c.view().active_filter, Some(Filter::Completed));
        assert_eq!(ids(c.view().renders.last().unwrap()), vec![TodoId::from(2)]);

        c.set_filter_name("active");
        assert_eq!(ids(&c.filtered_view()), vec![TodoId::from(1)]);

        c.set_filter_name("bogus");
        assert_eq!(c.filter(), Filter::All);
        assert_eq!(ids(&c.filtered_view()), vec![TodoId::from(1), TodoId::from(2)]);

        assert_eq!(c.transport().requests().len(), 1);
        assert_eq!(c.items().len(), 2);
    }

    #[test]
    fn summary_wording() {
        assert_eq!(format_summary(0), "0 items left");
        assert_eq!(format_summary(1), "1 item left");
        assert_eq!(format_summary(2), "2 items left");
        assert_eq!(format_summary(11), "11 items left");
    }
}
