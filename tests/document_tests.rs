//! Integration tests for GraphQL documents.
//!
//! Tests cover:
//! - Query normalization of realistic storefront documents
//! - Operation name and type extraction for logging
//! - Required variable detection
//! - Compile-time pairing of documents with requests

use catalyst_client::clients::{
    normalize_query, operation_info, required_variables, variable_definitions, OperationType,
    VariableDefinition,
};
use catalyst_client::{Document, FetchRequest, RawDocument};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const PRODUCT_QUERY: &str = r#"
    # Product detail page
    query ProductPage($entityId: Int!, $optionValueIds: [OptionValueId!], $useDefaultOptionSelections: Boolean = true) {
      site {
        product(entityId: $entityId, optionValueIds: $optionValueIds) {
          ...ProductFields
          description(format: "plain text, please")
        }
      }
    }

    fragment ProductFields on Product {
      entityId
      name
    }
"#;

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_normalizes_realistic_document() {
    assert_eq!(
        normalize_query(PRODUCT_QUERY),
        "query ProductPage($entityId:Int!,$optionValueIds:[OptionValueId!],$useDefaultOptionSelections:Boolean=true){site{product(entityId:$entityId,optionValueIds:$optionValueIds){...ProductFields description(format:\"plain text, please\")}}}fragment ProductFields on Product{entityId name}"
    );
}

#[test]
fn test_document_keeps_source_and_normalizes_on_demand() {
    let document: RawDocument = Document::from_string(PRODUCT_QUERY.to_string());

    assert_eq!(document.as_str(), PRODUCT_QUERY);
    assert_eq!(document.normalized(), normalize_query(PRODUCT_QUERY));
}

// ============================================================================
// Operation inspection
// ============================================================================

#[test]
fn test_operation_info_of_product_page() {
    let info = operation_info(PRODUCT_QUERY);

    assert_eq!(info.operation_type, OperationType::Query);
    assert_eq!(info.name.as_deref(), Some("ProductPage"));
    assert_eq!(info.operation_type.to_string(), "query");
}

#[test]
fn test_operation_info_for_mutation_after_fragment() {
    let source = "fragment Cart on Cart { entityId } mutation AddToCart($input: AddCartLineItemsInput!) { cart { addCartLineItems(input: $input) { cart { ...Cart } } } }";
    let info = operation_info(source);

    assert_eq!(info.operation_type, OperationType::Mutation);
    assert_eq!(info.display_name(), "AddToCart");
}

#[test]
fn test_variable_definitions_of_product_page() {
    assert_eq!(
        variable_definitions(PRODUCT_QUERY),
        vec![
            VariableDefinition {
                name: "entityId".to_string(),
                required: true,
            },
            VariableDefinition {
                name: "optionValueIds".to_string(),
                required: false,
            },
            VariableDefinition {
                name: "useDefaultOptionSelections".to_string(),
                required: false,
            },
        ]
    );
    assert_eq!(required_variables(PRODUCT_QUERY), vec!["entityId".to_string()]);
}

// ============================================================================
// Typed requests
// ============================================================================

#[derive(Debug, Serialize)]
struct ProductVariables {
    #[serde(rename = "entityId")]
    entity_id: i64,
}

#[derive(Debug, Deserialize)]
struct ProductData {
    site: Value,
}

static PRODUCT: Document<ProductData, ProductVariables> = Document::new(PRODUCT_QUERY);
static SETTINGS: Document<Value> = Document::new("query { site { settings { storeName } } }");

#[test]
fn test_typed_documents_build_requests() {
    let with_variables =
        FetchRequest::with_variables(&PRODUCT, ProductVariables { entity_id: 5 }).customer_id("7");
    let without_variables = FetchRequest::new(&SETTINGS).channel_id("2");
    let raw_document = RawDocument::new(PRODUCT_QUERY);
    let raw = FetchRequest::raw(&raw_document, Some(json!({ "entityId": 5 })));

    assert!(format!("{with_variables:?}").contains("entity_id: 5"));
    assert!(format!("{without_variables:?}").contains("\"2\""));
    assert!(format!("{raw:?}").contains("entityId"));
}
