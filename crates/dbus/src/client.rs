use std::{future::Future, time::Duration};

use anyhow::Context;
use log::debug;
use shared::error::CallError;
use zbus::{connection, proxy, Connection};

use crate::endpoint::Endpoint;

/// The reply timeout used by the reference gdigi client library.
pub const DEFAULT_METHOD_TIMEOUT: Duration = Duration::from_millis(1000);

#[proxy(
    interface = "gdigi.parameter.io",
    default_service = "gdigi.server",
    default_path = "/gdigi/parameter/Object"
)]
pub trait GdigiParameterIo {
    #[zbus(name = "get")]
    async fn get(&self, position: u32, id: u32) -> zbus::Result<u32>;

    /// The server answers with a status word which carries no information.
    #[zbus(name = "set")]
    async fn set(&self, position: u32, id: u32, value: u32) -> zbus::Result<u32>;
}

pub struct Client {
    proxy: GdigiParameterIoProxy<'static>,
    method_timeout: Duration,
}

impl Client {
    pub async fn init(
        endpoint: &Endpoint,
        client_name: Option<&str>,
        method_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mut builder = connection::Builder::session()?;
        if let Some(name) = client_name {
            builder = builder.name(name.to_owned())?;
        }

        let connection = builder
            .build()
            .await
            .context("Failed to connect to session bus")?;
        debug!("DBus: Connected to session bus");

        Self::with_connection(&connection, endpoint, method_timeout).await
    }

    pub async fn with_connection(
        connection: &Connection,
        endpoint: &Endpoint,
        method_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let proxy = GdigiParameterIoProxy::builder(connection)
            .destination(endpoint.service.clone())?
            .path(endpoint.path.clone())?
            .interface(endpoint.interface.clone())?
            .build()
            .await
            .with_context(|| format!("Failed to build the proxy for [{endpoint}]"))?;
        debug!("DBus: Proxy bound to [{endpoint}]");

        Ok(Self {
            proxy,
            method_timeout,
        })
    }

    pub async fn get(&self, position: u32, id: u32) -> anyhow::Result<u32> {
        let value = bounded("get", self.method_timeout, self.proxy.get(position, id)).await?;
        debug!("Get: (pos {position} id {id}) --> {value}");

        Ok(value)
    }

    pub async fn set(&self, position: u32, id: u32, value: u32) -> anyhow::Result<()> {
        bounded(
            "set",
            self.method_timeout,
            self.proxy.set(position, id, value),
        )
        .await?;
        debug!("Set: (pos {position} id {id}) --> {value}");

        Ok(())
    }
}

async fn bounded<T>(
    method: &'static str,
    method_timeout: Duration,
    call: impl Future<Output = zbus::Result<T>>,
) -> anyhow::Result<T> {
    match tokio::time::timeout(method_timeout, call).await {
        Ok(reply) => reply.with_context(|| format!("The remote '{method}' call failed")),
        Err(_) => Err(CallError::Timeout {
            method,
            timeout_ms: method_timeout.as_millis(),
        }
        .into()),
    }
}
