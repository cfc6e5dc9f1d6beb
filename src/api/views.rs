//! HTML rendering of the list view.

use serde::Serialize;
use tera::{Context, Tera};

use super::controller::TodoController;
use super::dto::SummaryResponse;
use super::flash::FlashMessage;
use crate::domain::{MAX_DESCRIPTION_LENGTH, TodoItem};

const LIST_TEMPLATE_NAME: &str = "list.html";
const LIST_TEMPLATE: &str = include_str!("../../templates/list.html");

/// One row of the list table.
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub id: i64,
    pub description: String,
    pub finished: bool,
    pub created_at: String,
}

impl From<&TodoItem> for ItemView {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id.value(),
            description: item.description.to_string(),
            finished: item.finished,
            created_at: item.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Everything the list template reads.
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub messages: Vec<FlashMessage>,
    pub draft: String,
    pub items: Vec<ItemView>,
    pub summary: SummaryResponse,
    pub max_unfinished: u64,
    pub max_description_length: usize,
}

impl ListView {
    /// Snapshot of a controller's state plus the messages to show.
    #[must_use]
    pub fn from_controller(controller: &TodoController<'_>, messages: Vec<FlashMessage>) -> Self {
        Self {
            messages,
            draft: controller.draft().to_string(),
            items: controller.todo_list().iter().map(ItemView::from).collect(),
            summary: controller.summary().into(),
            max_unfinished: controller.max_unfinished(),
            max_description_length: MAX_DESCRIPTION_LENGTH,
        }
    }
}

/// Compiled templates, built once at start-up.
#[derive(Debug)]
pub struct ViewRenderer {
    tera: Tera,
}

impl ViewRenderer {
    /// Compiles the embedded templates.
    ///
    /// # Errors
    ///
    /// Returns the `tera` parse error if a template is malformed.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(LIST_TEMPLATE_NAME, LIST_TEMPLATE)?;
        tera.autoescape_on(vec![".html"]);
        Ok(Self { tera })
    }

    /// Renders the list page.
    ///
    /// # Errors
    ///
    /// Returns the `tera` error if rendering fails.
    pub fn render_list(&self, view: &ListView) -> Result<String, tera::Error> {
        let context = Context::from_serialize(view)?;
        self.tera.render(LIST_TEMPLATE_NAME, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::TodoService;
    use crate::domain::{Description, TodoDraft, TodoId};
    use crate::infrastructure::InMemoryTodoRepository;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use std::sync::Arc;

    fn view(items: Vec<ItemView>, messages: Vec<FlashMessage>) -> ListView {
        ListView {
            messages,
            draft: String::new(),
            items,
            summary: SummaryResponse {
                finished: 0,
                unfinished: 0,
                total: 0,
                completion_percent: 0,
            },
            max_unfinished: 5,
            max_description_length: MAX_DESCRIPTION_LENGTH,
        }
    }

    #[rstest]
    fn item_view_formats_timestamp() {
        let item = TodoItem {
            id: TodoId::new(2),
            description: Description::parse("format me").unwrap(),
            finished: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };

        assert_eq!(ItemView::from(&item).created_at, "2024-01-02 03:04:05");
    }

    #[rstest]
    fn empty_list_renders_placeholder() {
        let renderer = ViewRenderer::new().unwrap();

        let html = renderer.render_list(&view(vec![], vec![])).unwrap();

        assert!(html.contains("No TODOs yet."));
        assert!(html.contains("Up to 5 unfinished TODOs"));
    }

    #[rstest]
    fn messages_and_items_are_escaped() {
        let renderer = ViewRenderer::new().unwrap();
        let items = vec![ItemView {
            id: 1,
            description: "<script>x</script>".to_string(),
            finished: false,
            created_at: "2024-01-01 00:00:00".to_string(),
        }];

        let html = renderer
            .render_list(&view(items, vec![FlashMessage::error("<b>bad</b>")]))
            .unwrap();

        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("message error"));
        assert!(!html.contains("<b>bad</b>"));
    }

    #[rstest]
    fn finished_items_have_no_finish_button() {
        let renderer = ViewRenderer::new().unwrap();
        let items = vec![
            ItemView {
                id: 1,
                description: "done".to_string(),
                finished: true,
                created_at: String::new(),
            },
            ItemView {
                id: 2,
                description: "open".to_string(),
                finished: false,
                created_at: String::new(),
            },
        ];

        let html = renderer.render_list(&view(items, vec![])).unwrap();

        assert!(!html.contains("/todos/1/finish"));
        assert!(html.contains("/todos/1/delete"));
        assert!(html.contains("/todos/2/finish"));
    }

    #[rstest]
    #[tokio::test]
    async fn from_controller_copies_state() {
        let service = TodoService::new(Arc::new(InMemoryTodoRepository::new()), 3);
        service
            .create(TodoDraft::new("snapshot").unwrap())
            .await
            .unwrap();
        let mut controller = TodoController::init(&service).await.unwrap();
        controller.set_draft("half typed");

        let list_view =
            ListView::from_controller(&controller, vec![FlashMessage::info("hello")]);

        assert_eq!(list_view.items.len(), 1);
        assert_eq!(list_view.draft, "half typed");
        assert_eq!(list_view.summary.unfinished, 1);
        assert_eq!(list_view.max_unfinished, 3);
        assert_eq!(list_view.messages, vec![FlashMessage::info("hello")]);
    }
}
