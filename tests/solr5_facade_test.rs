mod test_utils;

use mockito::Matcher;
use serde_json::json;

use search_schema::{ connect, SchemaGroup, SolrVersion };
use test_utils::{ config_for, mock_get, SOLR8_SCHEMA };

#[tokio::test]
async fn test_field_type_by_name() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "responseHeader": { "status": 0 },
        "fieldType": { "name": "text_general", "class": "solr.TextField" }
    }).to_string();
    let mock = mock_get(&mut server, "/solr/ckan/schema/fieldtypes/text_general", 200, &body).await;

    let conn = connect(&config_for(&server, SolrVersion::Solr5)).unwrap();
    let found = conn.get_field_types(Some("text_general")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(found, vec![json!({ "name": "text_general", "class": "solr.TextField" })]);
}

#[tokio::test]
async fn test_missing_field_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_get(
        &mut server,
        "/solr/ckan/schema/fields/nope",
        404,
        r#"{"error":{"msg":"Field 'nope' not found."}}"#
    ).await;

    let conn = connect(&config_for(&server, SolrVersion::Solr5)).unwrap();
    let err = conn.get_fields(Some("nope")).await.unwrap_err();
    assert!(err.is_api());
    assert_eq!(err.to_string(), "fields `nope` doesn't exist");
}

#[tokio::test]
async fn test_group_listings() {
    let mut server = mockito::Server::new_async().await;
    let fields = json!({ "fields": [{ "name": "id" }, { "name": "title" }] }).to_string();
    let copy = json!({ "copyFields": [{ "source": "title", "dest": "text" }] }).to_string();
    let _fields = mock_get(&mut server, "/solr/ckan/schema/fields", 200, &fields).await;
    let _copy = mock_get(&mut server, "/solr/ckan/schema/copyfields", 200, &copy).await;

    let conn = connect(&config_for(&server, SolrVersion::Solr5)).unwrap();
    assert_eq!(conn.get_fields(None).await.unwrap().len(), 2);
    assert_eq!(conn.get_copy_fields(Some("title")).await.unwrap().len(), 1);
    assert!(conn.get_copy_fields(Some("notes")).await.unwrap_err().is_api());
}

#[tokio::test]
async fn test_full_schema() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_get(&mut server, "/solr/ckan/schema", 200, SOLR8_SCHEMA).await;

    let conn = connect(&config_for(&server, SolrVersion::Solr5)).unwrap();
    assert_eq!(conn.get_full_schema().await.unwrap().name(), Some("ckan"));
}

#[tokio::test]
async fn test_clear_is_a_no_op() {
    let mut server = mockito::Server::new_async().await;
    let get = server.mock("GET", Matcher::Any).expect(0).create_async().await;
    let post = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    let conn = connect(&config_for(&server, SolrVersion::Solr5)).unwrap();
    conn.clear_schema(&SchemaGroup::ALL).await.unwrap();

    get.assert_async().await;
    post.assert_async().await;
}

#[tokio::test]
async fn test_names_are_sent_as_one_path_segment() {
    let mut server = mockito::Server::new_async().await;
    let wrong = mock_get(
        &mut server,
        "/solr/ckan/schema/fields/a",
        200,
        r#"{"field":{"name":"a","type":"string"}}"#
    ).await;
    let right = server
        .mock("GET", Matcher::Regex(r"^/solr/ckan/schema/fields/a%23b$".into()))
        .match_query(Matcher::UrlEncoded("wt".into(), "json".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"field":{"name":"a#b","type":"string"}}"#)
        .create_async().await;

    let conn = connect(&config_for(&server, SolrVersion::Solr5)).unwrap();
    let found = conn.get_fields(Some("a#b")).await.unwrap();

    assert_eq!(found[0]["name"], "a#b");
    right.assert_async().await;
    assert!(!wrong.matched_async().await);
}
