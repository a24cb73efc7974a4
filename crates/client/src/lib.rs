use anyhow::Context;
use dbus::endpoint::Endpoint;
use log::debug;
use std::{io::Write, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get { position: u32, id: u32 },
    Set { position: u32, id: u32, value: u32 },
}

/// Remote access to the gdigi parameters.
#[allow(async_fn_in_trait)]
pub trait ParameterIo {
    async fn get(&self, position: u32, id: u32) -> anyhow::Result<u32>;
    async fn set(&self, position: u32, id: u32, value: u32) -> anyhow::Result<()>;
}

impl ParameterIo for dbus::client::Client {
    async fn get(&self, position: u32, id: u32) -> anyhow::Result<u32> {
        dbus::client::Client::get(self, position, id).await
    }

    async fn set(&self, position: u32, id: u32, value: u32) -> anyhow::Result<()> {
        dbus::client::Client::set(self, position, id, value).await
    }
}

pub struct GdigiClient<P> {
    io: P,
}

impl GdigiClient<dbus::client::Client> {
    pub async fn init(
        endpoint: &Endpoint,
        client_name: Option<&str>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = dbus::client::Client::init(endpoint, client_name, timeout).await?;
        Ok(Self::new(client))
    }
}

impl<P: ParameterIo> GdigiClient<P> {
    pub fn new(io: P) -> Self {
        Self { io }
    }

    /// Performs the single remote call the operation asks for and reports it to `out`.
    pub async fn dispatch<W: Write>(&self, operation: Operation, out: &mut W) -> anyhow::Result<()> {
        debug!("Client: Dispatching {operation:?}");

        match operation {
            Operation::Get { position, id } => {
                let value = self
                    .io
                    .get(position, id)
                    .await
                    .with_context(|| format!("Failed to get (pos {position} id {id})"))?;

                writeln!(out, "{}\n", parameter_line(position, id, value))?;
            }
            Operation::Set {
                position,
                id,
                value,
            } => {
                // The announcement goes out before the call.
                writeln!(out, "calling set\n")?;
                writeln!(out, "{}\n", parameter_line(position, id, value))?;
                out.flush()?;

                self.io
                    .set(position, id, value)
                    .await
                    .with_context(|| {
                        format!("Failed to set (pos {position} id {id}) to {value}")
                    })?;
            }
        }

        Ok(())
    }
}

fn parameter_line(position: u32, id: u32, value: u32) -> String {
    format!("( {position} , {id} ) -->  {value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    enum Call {
        Get(u32, u32),
        Set(u32, u32, u32),
    }

    #[derive(Default)]
    struct FakeIo {
        value: u32,
        fail: bool,
        calls: RefCell<Vec<Call>>,
    }

    impl ParameterIo for FakeIo {
        async fn get(&self, position: u32, id: u32) -> anyhow::Result<u32> {
            self.calls.borrow_mut().push(Call::Get(position, id));
            if self.fail {
                bail!("The name gdigi.server was not provided by any .service files");
            }
            Ok(self.value)
        }

        async fn set(&self, position: u32, id: u32, value: u32) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(Call::Set(position, id, value));
            if self.fail {
                bail!("The name gdigi.server was not provided by any .service files");
            }
            Ok(())
        }
    }

    fn output(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn get_prints_returned_value() {
        let client = GdigiClient::new(FakeIo {
            value: 64,
            ..Default::default()
        });
        let mut out = Vec::new();

        client
            .dispatch(Operation::Get { position: 5, id: 2 }, &mut out)
            .await
            .unwrap();

        assert_eq!(*client.io.calls.borrow(), vec![Call::Get(5, 2)]);
        assert_eq!(output(out), "( 5 , 2 ) -->  64\n\n");
    }

    #[tokio::test]
    async fn set_announces_and_forwards_arguments() {
        let client = GdigiClient::new(FakeIo::default());
        let mut out = Vec::new();

        client
            .dispatch(
                Operation::Set {
                    position: 5,
                    id: 2,
                    value: 64,
                },
                &mut out,
            )
            .await
            .unwrap();

        assert_eq!(*client.io.calls.borrow(), vec![Call::Set(5, 2, 64)]);
        assert_eq!(output(out), "calling set\n\n( 5 , 2 ) -->  64\n\n");
    }

    #[tokio::test]
    async fn get_failure_propagates_without_output() {
        let client = GdigiClient::new(FakeIo {
            fail: true,
            ..Default::default()
        });
        let mut out = Vec::new();

        let err = client
            .dispatch(Operation::Get { position: 5, id: 2 }, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to get (pos 5 id 2)");
        assert!(format!("{err:#}").contains("gdigi.server"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn set_failure_propagates() {
        let client = GdigiClient::new(FakeIo {
            fail: true,
            ..Default::default()
        });
        let mut out = Vec::new();

        let result = client
            .dispatch(
                Operation::Set {
                    position: 0,
                    id: 4294967295,
                    value: 1,
                },
                &mut out,
            )
            .await;

        assert!(result.is_err());
        assert_eq!(*client.io.calls.borrow(), vec![Call::Set(0, u32::MAX, 1)]);
    }

    #[test]
    fn line_format() {
        assert_eq!(parameter_line(12, 0, 7), "( 12 , 0 ) -->  7");
    }
}
