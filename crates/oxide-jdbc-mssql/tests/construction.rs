//! Client construction from configuration values, catalog properties
//! and catalog files.

mod common;

use std::collections::HashMap;
use std::io::Write;

use common::{connector_id, URL};
use oxide_jdbc_core::testing::RecordingDriver;
use oxide_jdbc_core::{BaseJdbcConfig, IsolationLevel, JdbcClient, JdbcError};
use oxide_jdbc_mssql::{
    MsSqlCatalogConfig, MsSqlClient, MsSqlConfig, NULL_CATALOG_MEANS_CURRENT,
    TRANSACTION_ISOLATION,
};

#[test]
fn dialect_properties_win_over_anything_seeded() {
    let (client, _) = common::client(IsolationLevel::ReadCommitted);
    let props = client.connection_properties();
    assert_eq!(props.get(NULL_CATALOG_MEANS_CURRENT), Some("false"));
    assert_eq!(props.get(TRANSACTION_ISOLATION), Some("2"));
    assert_eq!(props.len(), 4);
}

#[test]
fn construction_does_not_connect() {
    let driver = RecordingDriver::new();
    let inner = driver.clone();
    MsSqlClient::new(
        connector_id(),
        &BaseJdbcConfig::new(URL),
        &MsSqlConfig::new(IsolationLevel::Serializable),
        || Ok(inner),
    )
    .unwrap();
    assert_eq!(driver.connect_attempts(), 0);
}

#[test]
fn from_catalog_properties() {
    let properties: HashMap<String, String> = [
        ("connection-url", URL),
        ("connection-user", "presto"),
        ("mssql.isolation-level", "SERIALIZABLE"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let client =
        MsSqlClient::from_properties(connector_id(), &properties, || Ok(RecordingDriver::new()))
            .unwrap();
    assert_eq!(client.isolation_level(), IsolationLevel::Serializable);
    assert_eq!(client.connection_properties().get(TRANSACTION_ISOLATION), Some("8"));
    assert_eq!(client.connector_id().as_str(), "sqlserver");
}

#[test]
fn from_catalog_properties_accepts_spaces_in_url_properties() {
    let url = "jdbc:jtds:sqlserver://db:1433/sales;appName=Presto Worker";
    let properties: HashMap<String, String> = [("connection-url", url)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let client =
        MsSqlClient::from_properties(connector_id(), &properties, || Ok(RecordingDriver::new()))
            .unwrap();
    assert_eq!(client.base().connection_url(), url);
}

#[test]
fn from_catalog_properties_rejects_unknown_level() {
    let properties: HashMap<String, String> = [
        ("connection-url", URL),
        ("mssql.isolation-level", "16"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let err = MsSqlClient::from_properties(connector_id(), &properties, || {
        Ok(RecordingDriver::new())
    })
    .unwrap_err();
    assert!(matches!(err, JdbcError::Configuration(_)));
}

#[test]
fn from_catalog_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"connection-url": "{URL}", "connection-user": "presto", "mssql.isolation-level": 4}}"#
    )
    .unwrap();

    let config = MsSqlCatalogConfig::load(file.path()).unwrap();
    let client = MsSqlClient::new(connector_id(), &config.base, &config.mssql(), || {
        Ok(RecordingDriver::new())
    })
    .unwrap();
    assert_eq!(client.isolation_level(), IsolationLevel::RepeatableRead);
    assert_eq!(client.connection_properties().get("user"), Some("presto"));
}

#[test]
fn missing_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = MsSqlCatalogConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, JdbcError::Configuration(msg) if msg.contains("absent.json")));
}
