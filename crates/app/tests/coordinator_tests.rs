//! End-to-end behaviour of the coordinator with scripted collaborators.

use graphiql_app::{
    Coordinator, EditorAction, InspectOutcome, OperationRunner, TextEditor,
    DEFAULT_QUERY, INSPECT_OPERATION_CHORD,
};
use graphiql_explorer::{ExplorerView, NodeHandle};
use graphiql_introspect::{FetchError, GraphQLRequest, OperationType, Result, Transport};
use graphiql_syntax::DefinitionKey;
use graphiql_test_utils::{
    extract_cursor, pages_introspection, ScriptedTransport, PAGES_DOCUMENT,
};
use graphiql_types::Position;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

#[derive(Debug, Default)]
struct RecordingView {
    revealed: Vec<NodeHandle>,
}

impl ExplorerView for RecordingView {
    fn scroll_into_view(&mut self, node: NodeHandle) {
        self.revealed.push(node);
    }
}

fn key(text: &str) -> DefinitionKey {
    DefinitionKey::parse(text).unwrap()
}

fn coordinator(transport: ScriptedTransport) -> Coordinator<ScriptedTransport, RecordingView> {
    Coordinator::new(transport, RecordingView::default())
}

#[test]
fn test_initial_state() {
    let coordinator = coordinator(ScriptedTransport::new());
    assert_eq!(coordinator.document(), DEFAULT_QUERY);
    assert!(coordinator.explorer_visible());
    assert!(coordinator.schema().is_none());
}

#[test]
fn test_default_query_hint_lines() {
    let mut lines = DEFAULT_QUERY.lines();
    assert_eq!(
        lines.next(),
        Some("# shift-option/alt-click on a query below to jump to it in the explorer")
    );
    assert_eq!(
        lines.next(),
        Some("# option/alt-click on a field in the explorer to select all subfields")
    );
    assert_eq!(lines.next(), Some("query GET_PAGES {"));
}

#[test]
fn test_edit_replaces_document_and_notifies() {
    let coordinator = coordinator(ScriptedTransport::new());
    let mut document = coordinator.subscribe_document();

    coordinator.on_edit("{ f }");

    assert!(document.has_changed().unwrap());
    assert_eq!(*document.borrow_and_update(), "{ f }");
    assert_eq!(coordinator.document(), "{ f }");
}

#[test]
fn test_toggle_explorer() {
    let coordinator = coordinator(ScriptedTransport::new());
    let visible = coordinator.subscribe_explorer_visible();

    coordinator.on_toggle_explorer();
    assert!(!coordinator.explorer_visible());
    assert!(!*visible.borrow());

    coordinator.on_toggle_explorer();
    assert!(coordinator.explorer_visible());
}

#[test]
fn test_inspect_reveals_enclosing_definition() {
    let coordinator = coordinator(ScriptedTransport::new());
    let (document, pointer) = extract_cursor("query A { a }\n\nmutation Save { sa*ve }\n");
    coordinator.on_edit(document);
    let editor = TextEditor::new(coordinator.subscribe_document());

    let outcome = coordinator.inspect_operation(&editor, pointer);

    assert_eq!(outcome, InspectOutcome::Revealed(key("mutation-Save")));
    let revealed = coordinator.with_explorer(|explorer| explorer.view().revealed.clone());
    assert_eq!(revealed.len(), 1);
    assert_eq!(revealed[0].index(), 1);
}

#[test]
fn test_inspect_default_document() {
    let coordinator = coordinator(ScriptedTransport::new());
    let editor = TextEditor::new(coordinator.subscribe_document());

    let outcome = coordinator.inspect_operation(&editor, Position::new(6, 7));
    assert_eq!(outcome, InspectOutcome::Revealed(key("query-GET_PAGES")));
}

#[test]
fn test_inspect_on_hint_comment_finds_no_definition() {
    let coordinator = coordinator(ScriptedTransport::new());
    let editor = TextEditor::new(coordinator.subscribe_document());

    let outcome = coordinator.inspect_operation(&editor, Position::new(0, 4));
    assert_eq!(outcome, InspectOutcome::NoEnclosingDefinition);
    assert!(coordinator.with_explorer(|explorer| explorer.view().revealed.is_empty()));
}

#[test]
fn test_inspect_unparsable_document() {
    let coordinator = coordinator(ScriptedTransport::new());
    coordinator.on_edit("quer A{f}");
    let editor = TextEditor::new(coordinator.subscribe_document());

    let outcome = coordinator.inspect_operation(&editor, Position::new(0, 7));
    assert!(matches!(outcome, InspectOutcome::ParseFailure { .. }), "{outcome:?}");
}

#[test]
fn test_inspect_off_the_document() {
    let coordinator = coordinator(ScriptedTransport::new());
    let editor = TextEditor::new(coordinator.subscribe_document());

    let outcome = coordinator.inspect_operation(&editor, Position::new(400, 0));
    assert_eq!(outcome, InspectOutcome::NoToken);
}

#[test]
fn test_inspect_with_closed_explorer() {
    let coordinator = coordinator(ScriptedTransport::new());
    coordinator.on_toggle_explorer();
    let editor = TextEditor::new(coordinator.subscribe_document());

    let outcome = coordinator.inspect_operation(&editor, Position::new(6, 7));
    assert_eq!(outcome, InspectOutcome::NodeNotFound(key("query-GET_PAGES")));
    assert!(coordinator.with_explorer(|explorer| explorer.view().revealed.is_empty()));
}

#[test]
fn test_inspect_on_type_definition_finds_no_node() {
    let coordinator = coordinator(ScriptedTransport::new());
    let (document, pointer) = extract_cursor("type Post { tit*le: String }\nquery A { a }\n");
    coordinator.on_edit(document);
    let editor = TextEditor::new(coordinator.subscribe_document());

    let outcome = coordinator.inspect_operation(&editor, pointer);
    assert_eq!(outcome, InspectOutcome::NodeNotFound(key("unknown-unknown")));
    assert!(coordinator.with_explorer(|explorer| explorer.view().revealed.is_empty()));
}

#[test]
fn test_inspect_while_explorer_is_borrowed() {
    let coordinator = coordinator(ScriptedTransport::new());
    let editor = TextEditor::new(coordinator.subscribe_document());

    let outcome =
        coordinator.with_explorer(|_| coordinator.inspect_operation(&editor, Position::new(6, 7)));
    assert_eq!(outcome, InspectOutcome::NodeNotFound(key("query-GET_PAGES")));

    let outcome = coordinator.inspect_operation(&editor, Position::new(6, 7));
    assert_eq!(outcome, InspectOutcome::Revealed(key("query-GET_PAGES")));
}

#[test]
fn test_prettify_reformats_document() {
    let coordinator = coordinator(ScriptedTransport::new());
    coordinator.on_edit("query A{pages{edges{node{title}}}}");
    let mut document = coordinator.subscribe_document();

    coordinator.on_prettify().unwrap();

    assert!(document.has_changed().unwrap());
    let pretty = document.borrow_and_update().clone();
    assert!(pretty.starts_with("query A {\n  pages {\n"), "{pretty}");

    // Already formatted: nothing to publish.
    coordinator.on_prettify().unwrap();
    assert!(!document.has_changed().unwrap());
    assert_eq!(coordinator.document(), pretty);
}

#[test]
fn test_prettify_leaves_unparsable_document() {
    let coordinator = coordinator(ScriptedTransport::new());
    coordinator.on_edit("query A { f");
    let document = coordinator.subscribe_document();

    assert!(coordinator.on_prettify().is_err());
    assert!(!document.has_changed().unwrap());
    assert_eq!(coordinator.document(), "query A { f");
}

#[test]
fn test_toggle_history() {
    let coordinator = coordinator(ScriptedTransport::new());
    let visible = coordinator.subscribe_history_visible();
    assert!(!coordinator.history_visible());

    coordinator.on_toggle_history();
    assert!(coordinator.history_visible());
    assert!(*visible.borrow());

    coordinator.on_toggle_history();
    assert!(!coordinator.history_visible());
    assert!(coordinator.explorer_visible());
}

#[tokio::test]
async fn test_run_operation_records_history() {
    let transport = ScriptedTransport::new()
        .respond(json!({ "data": {} }))
        .fail(FetchError::Http(500, String::new()))
        .respond(json!({ "data": {} }));
    let coordinator = coordinator(transport);
    coordinator.on_edit("query A { a } query B { b }");

    coordinator.on_run_operation(Some("A")).await.unwrap();
    coordinator.on_run_operation(Some("B")).await.unwrap_err();
    coordinator.on_run_operation(Some("B")).await.unwrap();

    let history = coordinator.history();
    let names: Vec<Option<&str>> = history
        .iter()
        .map(|entry| entry.operation_name.as_deref())
        .collect();
    assert_eq!(names, vec![Some("B"), Some("A")]);

    coordinator.on_edit("{ other }");
    coordinator.on_select_history(&history[1]);
    assert_eq!(coordinator.document(), "query A { a } query B { b }");
}

#[test]
fn test_inspect_duplicate_anonymous_operations_reveal_first_node() {
    let coordinator = coordinator(ScriptedTransport::new());
    let (document, pointer) = extract_cursor("{ a }\n{ b* }\n");
    coordinator.on_edit(document);
    let editor = TextEditor::new(coordinator.subscribe_document());

    let outcome = coordinator.inspect_operation(&editor, pointer);
    assert_eq!(outcome, InspectOutcome::Revealed(key("query-unknown")));
    let revealed = coordinator.with_explorer(|explorer| explorer.view().revealed.clone());
    assert_eq!(revealed[0].index(), 0);
}

#[tokio::test]
async fn test_schema_loads_once_and_registers_binding() {
    let transport = ScriptedTransport::new()
        .respond(pages_introspection())
        .respond(pages_introspection());
    let coordinator = coordinator(transport);
    let mut editor = TextEditor::new(coordinator.subscribe_document())
        .with_key_binding("Ctrl-Enter", EditorAction::RunOperation);

    let schema = coordinator.ensure_schema(&mut editor).await.unwrap();
    assert_eq!(schema.root_type(OperationType::Query), Some("Query"));
    assert_eq!(schema.type_count(), 5);
    assert!(coordinator.schema().is_some());
    assert_eq!(
        editor.key_binding(INSPECT_OPERATION_CHORD),
        Some(EditorAction::InspectOperation)
    );
    assert_eq!(
        editor.key_binding("Ctrl-Enter"),
        Some(EditorAction::RunOperation)
    );

    // Later renders and edits do not fetch again.
    coordinator.ensure_schema(&mut editor).await;
    coordinator.on_edit(PAGES_DOCUMENT);
    coordinator.ensure_schema(&mut editor).await;
    assert_eq!(coordinator.transport().request_count(), 1);

    // An explicit refresh does.
    coordinator.refresh_schema(&mut editor).await.unwrap();
    assert_eq!(coordinator.transport().request_count(), 2);
    assert_eq!(editor.key_bindings().len(), 2);
}

#[tokio::test]
async fn test_schema_update_is_published() {
    let transport = ScriptedTransport::new().respond(pages_introspection());
    let coordinator = coordinator(transport);
    let mut schema_updates = coordinator.subscribe_schema();
    let mut editor = TextEditor::detached("");

    coordinator.ensure_schema(&mut editor).await;

    assert!(schema_updates.has_changed().unwrap());
    let published = schema_updates.borrow_and_update().clone().unwrap();
    assert_eq!(published.root_fields(OperationType::Mutation), vec!["savePage"]);
}

#[tokio::test]
async fn test_schema_failure_degrades_without_binding() {
    let transport = ScriptedTransport::new().fail(FetchError::Network("connection refused".into()));
    let coordinator = coordinator(transport);
    let mut editor = TextEditor::new(coordinator.subscribe_document());

    assert!(coordinator.ensure_schema(&mut editor).await.is_none());
    assert!(coordinator.schema().is_none());
    assert_eq!(editor.key_binding(INSPECT_OPERATION_CHORD), None);

    // Inspecting still works without a schema.
    let outcome = coordinator.inspect_operation(&editor, Position::new(6, 7));
    assert_eq!(outcome, InspectOutcome::Revealed(key("query-GET_PAGES")));
}

#[tokio::test]
async fn test_malformed_introspection_degrades() {
    let transport = ScriptedTransport::new().respond(json!({ "data": { "__schema": "nope" } }));
    let coordinator = coordinator(transport);
    let mut editor = TextEditor::detached("");

    assert!(coordinator.ensure_schema(&mut editor).await.is_none());
    assert!(editor.key_bindings().is_empty());
}

#[tokio::test]
async fn test_refresh_after_failure_loads_schema() {
    let transport = ScriptedTransport::new()
        .fail(FetchError::Http(502, "bad gateway".into()))
        .respond(pages_introspection());
    let coordinator = coordinator(transport);
    let mut editor = TextEditor::detached("");

    assert!(coordinator.ensure_schema(&mut editor).await.is_none());
    assert!(coordinator.ensure_schema(&mut editor).await.is_none());
    assert!(coordinator.refresh_schema(&mut editor).await.is_some());
    assert_eq!(
        editor.key_binding(INSPECT_OPERATION_CHORD),
        Some(EditorAction::InspectOperation)
    );
}

#[tokio::test]
async fn test_schema_annotates_explorer_nodes() {
    let transport = ScriptedTransport::new().respond(pages_introspection());
    let coordinator = coordinator(transport);
    coordinator.on_edit(PAGES_DOCUMENT);
    let mut editor = TextEditor::new(coordinator.subscribe_document());

    coordinator.ensure_schema(&mut editor).await;

    let fields: Vec<(String, Vec<String>)> = coordinator.with_explorer(|explorer| {
        explorer
            .index()
            .nodes()
            .map(|node| (node.key.to_string(), node.root_fields.clone()))
            .collect()
    });
    insta::assert_debug_snapshot!(fields, @r#"
    [
        (
            "query-GET_PAGES",
            [
                "pages",
                "page",
            ],
        ),
        (
            "mutation-SavePage",
            [
                "savePage",
            ],
        ),
        (
            "fragment-PageFields",
            [],
        ),
    ]
    "#);
}

#[tokio::test]
async fn test_run_operation_forwards_document_and_name() {
    let transport = ScriptedTransport::new()
        .respond(json!({ "data": { "pages": null } }))
        .respond(json!({ "data": null }));
    let coordinator = coordinator(transport);
    coordinator.on_edit(PAGES_DOCUMENT);

    let response = coordinator.on_run_operation(Some("GET_PAGES")).await.unwrap();
    assert_eq!(response, json!({ "data": { "pages": null } }));

    // Names are not checked against the document.
    coordinator.on_run_operation(Some("NotInDocument")).await.unwrap();

    let requests = coordinator.transport().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].query, PAGES_DOCUMENT);
    assert_eq!(requests[0].operation_name.as_deref(), Some("GET_PAGES"));
    assert_eq!(requests[1].operation_name.as_deref(), Some("NotInDocument"));
    assert_eq!(requests[1].variables, None);
    // User operations may have side effects; transports must not resend them.
    assert!(requests.iter().all(|request| !request.retryable));
}

#[tokio::test]
async fn test_run_operation_failure_is_returned() {
    let transport = ScriptedTransport::new().fail(FetchError::Http(403, "forbidden".into()));
    let coordinator = coordinator(transport);

    let err = coordinator.on_run_operation(None).await.unwrap_err();
    assert_eq!(err, FetchError::Http(403, "forbidden".into()));
}

#[derive(Default)]
struct RecordingRunner {
    runs: RefCell<Vec<(String, Option<String>)>>,
}

impl OperationRunner for RecordingRunner {
    async fn run(&self, document: &str, operation_name: Option<&str>) -> Result<Value> {
        self.runs
            .borrow_mut()
            .push((document.to_string(), operation_name.map(str::to_string)));
        Ok(json!({ "data": {} }))
    }
}

#[tokio::test]
async fn test_run_operation_passes_name_through_unchanged() {
    let coordinator = Coordinator::with_runner(
        ScriptedTransport::new(),
        RecordingView::default(),
        RecordingRunner::default(),
    );
    coordinator.on_edit("query A { a }");

    coordinator.on_run_operation(Some("  weird name ")).await.unwrap();
    coordinator.on_run_operation(None).await.unwrap();

    let runs = coordinator.runner().runs.borrow().clone();
    assert_eq!(
        runs,
        vec![
            ("query A { a }".to_string(), Some("  weird name ".to_string())),
            ("query A { a }".to_string(), None),
        ]
    );
    assert_eq!(coordinator.transport().request_count(), 0);
}

/// Transport whose responses are released by the test, in any order.
struct GatedTransport {
    gates: Mutex<VecDeque<oneshot::Receiver<Value>>>,
}

impl Transport for GatedTransport {
    async fn execute(&self, _request: &GraphQLRequest) -> Result<Value> {
        let gate = self.gates.lock().unwrap().pop_front().unwrap();
        gate.await.map_err(|e| FetchError::Network(e.to_string()))
    }
}

fn introspection_with_query_field(field: &str) -> Value {
    let mut response = pages_introspection();
    response["data"]["__schema"]["types"][0]["fields"][0]["name"] = json!(field);
    response
}

#[tokio::test]
async fn test_concurrent_loads_apply_in_completion_order() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let transport = GatedTransport {
        gates: Mutex::new(VecDeque::from([first_rx, second_rx])),
    };
    let coordinator = Coordinator::new(transport, RecordingView::default());
    let mut first_editor = TextEditor::detached("");
    let mut second_editor = TextEditor::detached("");
    let mut schema_updates = coordinator.subscribe_schema();

    let release = async move {
        second_tx.send(introspection_with_query_field("second")).unwrap();
        schema_updates.changed().await.unwrap();
        first_tx.send(introspection_with_query_field("first")).unwrap();
    };

    tokio::join!(
        coordinator.refresh_schema(&mut first_editor),
        coordinator.refresh_schema(&mut second_editor),
        release,
    );

    let schema = coordinator.schema().unwrap();
    assert_eq!(schema.root_fields(OperationType::Query), vec!["first", "page"]);
}
