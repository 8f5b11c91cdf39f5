//! Shared schema and document fixtures.
//!
//! The pages schema is a small content API in the shape a CMS endpoint
//! exposes: a connection of pages for queries and a save mutation. Tests
//! that care about schema structure should inline their own SDL instead.

use serde_json::{json, Value};

/// SDL equivalent of [`pages_introspection`].
pub const PAGES_SCHEMA: &str = r#"
type Query {
    pages: PageConnection
    page(id: ID!): Page
}

type Mutation {
    savePage(id: ID!, title: String): Page
}

type PageConnection {
    edges: [PageEdge]
}

type PageEdge {
    node: Page
}

type Page {
    id: ID!
    title: String
}
"#;

/// A document with a query, a mutation and a fragment, one per block.
pub const PAGES_DOCUMENT: &str = "query GET_PAGES {
  pages {
    edges {
      node {
        ...PageFields
      }
    }
  }
}

mutation SavePage($id: ID!) {
  savePage(id: $id) {
    id
  }
}

fragment PageFields on Page {
  id
  title
}
";

fn named(kind: &str, name: &str) -> Value {
    json!({ "kind": kind, "name": name, "ofType": null })
}

fn non_null(inner: Value) -> Value {
    json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
}

fn list(inner: Value) -> Value {
    json!({ "kind": "LIST", "name": null, "ofType": inner })
}

fn arg(name: &str, type_ref: Value) -> Value {
    json!({ "name": name, "description": null, "type": type_ref, "defaultValue": null })
}

fn field(name: &str, args: Vec<Value>, type_ref: Value) -> Value {
    json!({
        "name": name,
        "description": null,
        "args": args,
        "type": type_ref,
        "isDeprecated": false,
        "deprecationReason": null
    })
}

fn object(name: &str, fields: Vec<Value>) -> Value {
    json!({
        "kind": "OBJECT",
        "name": name,
        "description": null,
        "fields": fields,
        "inputFields": null,
        "interfaces": [],
        "enumValues": null,
        "possibleTypes": null
    })
}

fn scalar(name: &str) -> Value {
    json!({
        "kind": "SCALAR",
        "name": name,
        "description": null,
        "fields": null,
        "inputFields": null,
        "interfaces": null,
        "enumValues": null,
        "possibleTypes": null
    })
}

/// A full introspection response (`{"data": {"__schema": ...}}`) for the
/// pages schema, including built-in scalars, a meta type and the built-in
/// directives a real server reports.
pub fn pages_introspection() -> Value {
    let id = named("SCALAR", "ID");
    let string = named("SCALAR", "String");
    let page = named("OBJECT", "Page");

    let types = vec![
        object(
            "Query",
            vec![
                field("pages", vec![], named("OBJECT", "PageConnection")),
                field("page", vec![arg("id", non_null(id.clone()))], page.clone()),
            ],
        ),
        object(
            "Mutation",
            vec![field(
                "savePage",
                vec![arg("id", non_null(id.clone())), arg("title", string.clone())],
                page.clone(),
            )],
        ),
        object(
            "PageConnection",
            vec![field("edges", vec![], list(named("OBJECT", "PageEdge")))],
        ),
        object("PageEdge", vec![field("node", vec![], page)]),
        object(
            "Page",
            vec![
                field("id", vec![], non_null(id)),
                field("title", vec![], string.clone()),
            ],
        ),
        scalar("ID"),
        scalar("String"),
        scalar("Boolean"),
        object(
            "__Schema",
            vec![field("description", vec![], string.clone())],
        ),
    ];

    let boolean = non_null(named("SCALAR", "Boolean"));
    let directives = vec![
        json!({
            "name": "include",
            "description": null,
            "locations": ["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"],
            "args": [arg("if", boolean.clone())]
        }),
        json!({
            "name": "skip",
            "description": null,
            "locations": ["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"],
            "args": [arg("if", boolean)]
        }),
        json!({
            "name": "deprecated",
            "description": null,
            "locations": ["FIELD_DEFINITION", "ENUM_VALUE"],
            "args": [arg("reason", string)]
        }),
    ];

    json!({
        "data": {
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": { "name": "Mutation" },
                "subscriptionType": null,
                "types": types,
                "directives": directives
            }
        }
    })
}
