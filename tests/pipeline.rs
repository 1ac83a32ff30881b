// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end documentation of a small source tree.

use std::{fs, path::Path};

use entity_docify::{
    DocConfig, Documentation, GraphBuilder,
    graph::Entity,
    sample::{NoRecords, Record, RecordSource, StaticRecords},
    schema::{self, JsonType, ResourceDescriptor, Schema, TypeIdentity}
};
use serde_json::{Value, json};
use tempfile::TempDir;

const SHOP: &str = r#"
use chrono::{DateTime, Utc};

/// Product offered in the shop.
#[entity(table = "products")]
pub struct Product {
    #[id]
    #[auto]
    pub id: i64,

    /// Display name
    pub name: String,

    #[column(sql_type = "enum('active','inactive')")]
    pub status: String, // lifecycle state

    #[column(fk = "customers")]
    pub customer_id: i64,

    #[column(fk = "categories")]
    pub category_id: Option<i64>,

    pub created_at: DateTime<Utc>,

    pub category: Option<Category>,

    pub tags: Vec<Tag>,
}

/// Product grouping.
#[entity(table = "categories")]
pub struct Category {
    #[id]
    #[auto]
    pub id: i64,

    pub title: String,
}
"#;

const CRM: &str = r#"
/// Buyer account.
#[entity(table = "customers")]
pub struct Customer {
    #[id]
    pub customer_id: i64,

    #[column(unique)]
    pub email: String,
}
"#;

fn source_tree() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    write(root.path(), "shop/models.rs", SHOP);
    write(root.path(), "shop/zz_broken.rs", "pub struct {");
    write(root.path(), "crm/customer.rs", CRM);
    root
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn document_with(root: &TempDir, records: &dyn RecordSource) -> Documentation {
    let config = DocConfig::new(root.path()).with_overrides("Shop API", "Products and buyers");
    entity_docify::document(&config, records).unwrap()
}

fn document(root: &TempDir) -> Documentation {
    document_with(root, &NoRecords)
}

fn entity<'a>(docs: &'a Documentation, id: &str) -> &'a Entity {
    docs.find(id).unwrap_or_else(|| panic!("{id} not documented"))
}

#[test]
fn discovery_skips_unparsable_files() {
    let root = source_tree();
    let descriptors = schema::discover(root.path()).unwrap();
    let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["crm.Customer", "shop.Product", "shop.Category"]);
}

#[test]
fn entities_sorted_by_table_with_overrides() {
    let root = source_tree();
    let docs = document(&root);
    assert_eq!(docs.title, "Shop API");
    assert_eq!(docs.description, "Products and buyers");

    let tables: Vec<&str> = docs.entities.iter().map(|e| e.table.as_str()).collect();
    assert_eq!(tables, vec!["categories", "customers", "products"]);
    assert!(docs.diagnostics.is_empty(), "{:?}", docs.diagnostics);
}

#[test]
fn entity_identity_and_definition() {
    let root = source_tree();
    let docs = document(&root);
    let product = entity(&docs, "shop.Product");

    assert_eq!(product.name, "Product");
    assert_eq!(product.pkg, "shop");
    assert_eq!(product.path, "shop");
    assert_eq!(product.description, "Product offered in the shop.");

    let definition = &product.definition;
    assert!(definition.file.ends_with("models.rs"));
    assert!(definition.body.contains("pub struct Product"));
    syn::parse_file(&definition.body).unwrap();

    let names: Vec<&str> = definition.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec![
        "id",
        "name",
        "status",
        "customer_id",
        "category_id",
        "created_at",
        "category",
        "tags"
    ]);
    assert_eq!(definition.field("name").unwrap().description, "Display name");
    assert_eq!(definition.field("category_id").unwrap().ty, "Option<i64>");
    assert!(definition.field("status").unwrap().tag.contains("enum('active','inactive')"));
}

#[test]
fn column_fields() {
    let root = source_tree();
    let docs = document(&root);
    let product = entity(&docs, "shop.Product");

    let columns: Vec<&str> = product.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(columns, vec!["id", "name", "status", "customer_id", "category_id", "created_at"]);

    let keys: Vec<&str> = product.primary_key().map(|f| f.name.as_str()).collect();
    assert_eq!(keys, vec!["id"]);

    let status = product.field("status").unwrap();
    assert_eq!(status.enum_values, vec!["active", "inactive"]);
    assert_eq!(status.json_type, JsonType::String);

    let customer_id = product.field("customer_id").unwrap();
    assert_eq!(customer_id.json_type, JsonType::Integer);
    assert!(!customer_id.nullable);

    assert!(product.field("category_id").unwrap().nullable);
    assert_eq!(product.field("name").unwrap().description, "Display name");

    let customer = entity(&docs, "crm.Customer");
    assert!(customer.field("email").unwrap().unique);
}

#[test]
fn foreign_keys_resolve_by_table() {
    let root = source_tree();
    let docs = document(&root);
    let product = entity(&docs, "shop.Product");

    let customer_fk = product.field("customer_id").unwrap().foreign_key.as_ref().unwrap();
    assert_eq!(customer_fk.table, "customers");
    assert_eq!(customer_fk.field, "customer_id");
    assert_eq!(
        docs.foreign_key_target(customer_fk).map(|e| e.id.as_str()),
        Some("crm.Customer")
    );

    let category_fk = product.field("category_id").unwrap().foreign_key.as_ref().unwrap();
    assert_eq!(category_fk.field, "id");
    assert_eq!(
        docs.foreign_key_target(category_fk).map(|e| e.id.as_str()),
        Some("shop.Category")
    );
}

#[test]
fn associations() {
    let root = source_tree();
    let docs = document(&root);
    let product = entity(&docs, "shop.Product");

    assert_eq!(product.associations.len(), 2);

    let category = product.association("category").unwrap();
    assert_eq!(category.entity_name, "shop.Category");
    assert!(!category.array);
    assert_eq!(
        docs.association_target(category).map(|e| e.table.as_str()),
        Some("categories")
    );

    let tags = product.association("tags").unwrap();
    assert!(tags.array);
    assert!(tags.entity_name.is_empty());
    assert!(tags.entity.is_none());
}

#[test]
fn synthesized_samples() {
    let root = source_tree();
    let docs = document(&root);
    let sample = &entity(&docs, "shop.Product").data_sample;

    let create = sample.create_value().unwrap();
    let create = create.as_object().unwrap();
    let keys: Vec<&str> = create.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "status", "customer_id", "category_id"]);
    assert_eq!(create["status"], json!("active"));
    assert_eq!(create["name"].as_str().map(str::len), Some(10));
    assert!(create["customer_id"].is_u64());

    assert!(sample.create_json.contains("// String,Display name\n"));
    assert!(sample.create_json.contains("enum: active, inactive"));

    let update = sample.update_value().unwrap();
    assert!(update.get("id").is_none());
    assert_eq!(update["status"], json!("active"));

    let batch = sample.batch_value().unwrap();
    assert_eq!(batch.as_array().map(Vec::len), Some(1));
    assert_eq!(batch[0], Value::Object(create.clone()));

    let single = sample.single_value().unwrap();
    assert!(single["id"].is_u64());
    assert!(single["created_at"].is_string());
    assert_eq!(single["category"], json!({}));
    assert_eq!(single["tags"], json!([]));
    assert_eq!(sample.multiple_value().unwrap(), json!([single]));
}

#[test]
fn persisted_records_win_over_synthesis() {
    let root = source_tree();
    let records = StaticRecords::new().with(
        "crm.Customer",
        Record::new()
            .with("customer_id", json!(17))
            .with("email", json!("ada@example.com"))
    );
    let docs = document_with(&root, &records);
    let sample = &entity(&docs, "crm.Customer").data_sample;

    assert_eq!(
        sample.create_value().unwrap(),
        json!({"customer_id": 17, "email": "ada@example.com"})
    );
    assert_eq!(sample.update_value().unwrap(), json!({"email": "ada@example.com"}));
    assert_eq!(
        sample.single_response_json,
        "{\n\t\"customer_id\": 17,\n\t\"email\": \"ada@example.com\"\n}"
    );
}

fn build_with_extra(root: &TempDir, extra: ResourceDescriptor) -> Documentation {
    let config = DocConfig::new(root.path());
    let mut descriptors = schema::discover(root.path()).unwrap();
    descriptors.push(extra);
    GraphBuilder::new(&config, &NoRecords).build(&descriptors)
}

#[test]
fn missing_struct_is_a_diagnostic() {
    let root = source_tree();
    let docs = build_with_extra(
        &root,
        ResourceDescriptor::new("ghosts", TypeIdentity::new("crm", "Ghost"), Schema::default())
    );

    let ghost = entity(&docs, "crm.Ghost");
    assert!(ghost.definition.is_empty());
    assert_eq!(ghost.table, "ghosts");

    let diagnostics: Vec<String> = docs.diagnostics_for("crm.Ghost").map(ToString::to_string).collect();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("`Ghost` not found"), "{}", diagnostics[0]);

    assert!(!entity(&docs, "crm.Customer").definition.is_empty());
}

#[test]
fn unparsable_sibling_ends_lookup_with_parse_diagnostic() {
    let root = source_tree();
    let docs = build_with_extra(
        &root,
        ResourceDescriptor::new("ghosts", TypeIdentity::new("shop", "Ghost"), Schema::default())
    );

    let ghost = entity(&docs, "shop.Ghost");
    assert!(ghost.definition.is_empty());

    let diagnostics: Vec<String> = docs.diagnostics_for("shop.Ghost").map(ToString::to_string).collect();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("failed to parse"), "{}", diagnostics[0]);
    assert!(diagnostics[0].contains("zz_broken.rs"), "{}", diagnostics[0]);

    // models.rs sorts before the broken file
    assert!(!entity(&docs, "shop.Product").definition.is_empty());
}

#[test]
fn missing_source_root_is_an_error() {
    let config = DocConfig::new("/nonexistent/entity/sources");
    assert!(entity_docify::document(&config, &NoRecords).is_err());
}

#[test]
fn documentation_serializes() {
    let root = source_tree();
    let docs = document(&root);
    let value = serde_json::to_value(&docs).unwrap();
    assert_eq!(value["title"], json!("Shop API"));
    assert_eq!(value["entities"][2]["id"], json!("shop.Product"));
    assert_eq!(value["entities"][2]["fields"][2]["enum"], json!(["active", "inactive"]));
}
