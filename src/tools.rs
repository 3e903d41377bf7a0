//! Static tool catalog
//!
//! The three bookkeeping functions the model may invoke. Built once at
//! first use, shared read-only by every request. No validation logic lives
//! here: the catalog documents the contract for the backend model, it does
//! not enforce it.

use lazy_static::lazy_static;
use std::collections::BTreeMap;

use crate::models::ActionName;
use crate::protocol::{FunctionDecl, ParameterSpec, Tool, ToolParameters};

fn function_tool(
    name: ActionName,
    description: &str,
    properties: BTreeMap<String, ParameterSpec>,
    required: &[&str],
) -> Tool {
    Tool {
        tool_type: "function".to_string(),
        function: FunctionDecl {
            name: name.as_str().to_string(),
            description: description.to_string(),
            parameters: ToolParameters {
                schema_type: "object".to_string(),
                properties,
                required: required.iter().map(|s| s.to_string()).collect(),
            },
        },
    }
}

fn entry_properties(with_id: bool) -> BTreeMap<String, ParameterSpec> {
    let mut properties = BTreeMap::new();
    if with_id {
        properties.insert(
            "id".to_string(),
            ParameterSpec::new("Identifier of the expense", "string"),
        );
    }
    properties.insert(
        "title".to_string(),
        ParameterSpec::new("What the expense was for", "string"),
    );
    properties.insert(
        "amount".to_string(),
        ParameterSpec::new("Amount of the expense", "number"),
    );
    properties.insert(
        "category".to_string(),
        ParameterSpec::new("Category of the expense", "string"),
    );
    properties
}

lazy_static! {
    static ref CATALOG: Vec<Tool> = {
        let add = function_tool(
            ActionName::Add,
            "Record a new expense",
            entry_properties(false),
            &[],
        );

        let mut delete_properties = BTreeMap::new();
        delete_properties.insert(
            "id".to_string(),
            ParameterSpec::new("Identifier of the expense", "string"),
        );
        let delete = function_tool(
            ActionName::Delete,
            "Delete an existing expense",
            delete_properties,
            &["id"],
        );

        let update = function_tool(
            ActionName::Update,
            "Update an existing expense",
            entry_properties(true),
            &[],
        );

        vec![add, delete, update]
    };
}

/// The full catalog, in declaration order.
pub fn catalog() -> &'static [Tool] {
    &CATALOG
}
