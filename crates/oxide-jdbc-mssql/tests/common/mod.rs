#![allow(dead_code)]

use oxide_jdbc_core::testing::{Failures, RecordingDriver};
use oxide_jdbc_core::{BaseJdbcConfig, ConnectorId, IsolationLevel, JdbcOutputTableHandle, JdbcSplit};
use oxide_jdbc_mssql::{MsSqlClient, MsSqlConfig};

pub const URL: &str = "jdbc:jtds:sqlserver://primary:1433/sales";
pub const REPLICA_URL: &str = "jdbc:jtds:sqlserver://replica:1433/sales";

pub fn connector_id() -> ConnectorId {
    ConnectorId::new("sqlserver")
}

/// Builds a client over a recording driver; the returned driver shares
/// its recording with the one inside the client.
pub fn client_with(level: IsolationLevel, failures: Failures) -> (MsSqlClient, RecordingDriver) {
    let driver = RecordingDriver::failing(failures);
    let inner = driver.clone();
    let config = BaseJdbcConfig::new(URL).user("presto").password("secret");
    let client = MsSqlClient::new(connector_id(), &config, &MsSqlConfig::new(level), || {
        Ok(inner)
    })
    .unwrap_or_else(|e| panic!("failed to build client: {e}"));
    (client, driver)
}

pub fn client(level: IsolationLevel) -> (MsSqlClient, RecordingDriver) {
    client_with(level, Failures::default())
}

pub fn split() -> JdbcSplit {
    JdbcSplit::new(connector_id(), "orders", REPLICA_URL).schema("dbo")
}

pub fn output_handle() -> JdbcOutputTableHandle {
    JdbcOutputTableHandle::new(connector_id(), "orders_copy", "tmp_presto_0001")
        .column("id", "bigint")
        .column("placed_at", "datetime2")
}
