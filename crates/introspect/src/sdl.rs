//! SDL rendering of an introspected schema.

use crate::types::{
    CompositeType, IntrospectionField, IntrospectionInputValue, IntrospectionSchema,
    IntrospectionType, IntrospectionTypeRef,
};
use std::fmt::Write;

/// Built-in scalars every GraphQL schema already has.
const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Directives every GraphQL schema already has.
const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy", "oneOf"];

/// Renders an introspected schema as SDL.
///
/// Built-in scalars, introspection meta types and built-in directives are
/// left out, since a schema builder supplies them itself. A `schema { ... }`
/// block is written only when a root type does not use its default name.
#[must_use]
#[tracing::instrument(skip(schema), fields(
    types = schema.types.len(),
    directives = schema.directives.len()
))]
pub fn introspection_to_sdl(schema: &IntrospectionSchema) -> String {
    let mut sdl = String::new();

    let custom_root = |root: Option<&IntrospectionTypeRef>, default: &str| {
        root.is_some_and(|t| t.name != default)
    };
    if custom_root(schema.query_type.as_ref(), "Query")
        || custom_root(schema.mutation_type.as_ref(), "Mutation")
        || custom_root(schema.subscription_type.as_ref(), "Subscription")
    {
        sdl.push_str("schema {\n");
        for (keyword, root) in [
            ("query", &schema.query_type),
            ("mutation", &schema.mutation_type),
            ("subscription", &schema.subscription_type),
        ] {
            if let Some(root) = root {
                writeln!(sdl, "  {keyword}: {}", root.name).unwrap();
            }
        }
        sdl.push_str("}\n\n");
    }

    for directive in &schema.directives {
        if BUILTIN_DIRECTIVES.contains(&directive.name.as_str()) {
            continue;
        }

        write_description(&mut sdl, directive.description.as_deref(), 0);
        write!(sdl, "directive @{}", directive.name).unwrap();
        write_arguments(&mut sdl, &directive.args);
        writeln!(sdl, " on {}\n", directive.locations.join(" | ")).unwrap();
    }

    let mut types_written = 0;
    for type_def in &schema.types {
        if type_def.is_meta() || BUILTIN_SCALARS.contains(&type_def.name()) {
            continue;
        }

        write_type(&mut sdl, type_def);
        sdl.push_str("\n\n");
        types_written += 1;
    }

    tracing::debug!(types_written, sdl_length = sdl.len(), "SDL generated");
    sdl.trim_end().to_string()
}

fn write_type(sdl: &mut String, type_def: &IntrospectionType) {
    match type_def {
        IntrospectionType::Scalar(t) => {
            write_description(sdl, t.description.as_deref(), 0);
            write!(sdl, "scalar {}", t.name).unwrap();
        }
        IntrospectionType::Object(t) => write_composite(sdl, "type", t),
        IntrospectionType::Interface(t) => write_composite(sdl, "interface", t),
        IntrospectionType::Union(t) => {
            write_description(sdl, t.description.as_deref(), 0);
            let members: Vec<&str> = t.possible_types.iter().map(|m| m.name.as_str()).collect();
            write!(sdl, "union {} = {}", t.name, members.join(" | ")).unwrap();
        }
        IntrospectionType::Enum(t) => {
            write_description(sdl, t.description.as_deref(), 0);
            writeln!(sdl, "enum {} {{", t.name).unwrap();
            for value in &t.enum_values {
                write_description(sdl, value.description.as_deref(), 1);
                write!(sdl, "  {}", value.name).unwrap();
                write_deprecation(sdl, value.is_deprecated, value.deprecation_reason.as_deref());
                sdl.push('\n');
            }
            sdl.push('}');
        }
        IntrospectionType::InputObject(t) => {
            write_description(sdl, t.description.as_deref(), 0);
            writeln!(sdl, "input {} {{", t.name).unwrap();
            for field in &t.input_fields {
                write_description(sdl, field.description.as_deref(), 1);
                sdl.push_str("  ");
                write_input_value(sdl, field);
                sdl.push('\n');
            }
            sdl.push('}');
        }
    }
}

fn write_composite(sdl: &mut String, keyword: &str, t: &CompositeType) {
    write_description(sdl, t.description.as_deref(), 0);
    write!(sdl, "{keyword} {}", t.name).unwrap();

    if !t.interfaces.is_empty() {
        let names: Vec<&str> = t.interfaces.iter().map(|i| i.name.as_str()).collect();
        write!(sdl, " implements {}", names.join(" & ")).unwrap();
    }

    sdl.push_str(" {\n");
    for field in &t.fields {
        write_field(sdl, field);
    }
    sdl.push('}');
}

fn write_field(sdl: &mut String, field: &IntrospectionField) {
    write_description(sdl, field.description.as_deref(), 1);
    write!(sdl, "  {}", field.name).unwrap();
    write_arguments(sdl, &field.args);
    write!(sdl, ": {}", field.type_ref).unwrap();
    write_deprecation(sdl, field.is_deprecated, field.deprecation_reason.as_deref());
    sdl.push('\n');
}

fn write_arguments(sdl: &mut String, args: &[IntrospectionInputValue]) {
    if args.is_empty() {
        return;
    }

    sdl.push('(');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            sdl.push_str(", ");
        }
        write_input_value(sdl, arg);
    }
    sdl.push(')');
}

fn write_input_value(sdl: &mut String, value: &IntrospectionInputValue) {
    write!(sdl, "{}: {}", value.name, value.type_ref).unwrap();
    if let Some(default) = &value.default_value {
        write!(sdl, " = {default}").unwrap();
    }
}

fn write_deprecation(sdl: &mut String, is_deprecated: bool, reason: Option<&str>) {
    if !is_deprecated {
        return;
    }
    match reason {
        Some(reason) => write!(sdl, " @deprecated(reason: \"{}\")", escape_string(reason)).unwrap(),
        None => sdl.push_str(" @deprecated"),
    }
}

fn write_description(sdl: &mut String, description: Option<&str>, indent: usize) {
    let Some(desc) = description.filter(|d| !d.is_empty()) else {
        return;
    };
    let indent_str = "  ".repeat(indent);
    if desc.contains('\n') {
        let block = desc.replace("\"\"\"", "\\\"\"\"");
        writeln!(sdl, "{indent_str}\"\"\"\n{block}\n{indent_str}\"\"\"").unwrap();
    } else {
        writeln!(sdl, "{indent_str}\"{}\"", escape_string(desc)).unwrap();
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
