//! Async serial client for the alarm actuator

use crate::command::AlarmCommand;
use crate::error::ActuatorError;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info};

/// Default bounded timeout for a single command write
const DEFAULT_WRITE_TIMEOUT_MS: u64 = 250;

/// How long to wait for the firmware ready banner
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Banner the firmware prints once its setup loop is done
const READY_BANNER: &[u8] = b"<ready>";

enum Link {
    Serial(SerialStream),
    Mock { fail: bool, sent: Vec<u8> },
}

/// Client for the vibration actuator.
///
/// Writes are bounded by a timeout so a stalled link cannot stall frame
/// processing. A mock link is available for hardware-free tests; it
/// records every byte written (or fails every write, for degraded-link
/// tests).
pub struct ActuatorClient {
    device: String,
    timeout: Duration,
    link: Link,
}

impl ActuatorClient {
    /// Open the serial port to the actuator.
    pub async fn connect(device: &str, baud_rate: u32) -> Result<Self, ActuatorError> {
        info!(device, baud_rate, "opening actuator link");
        let port = tokio_serial::new(device, baud_rate).open_native_async()?;

        Ok(Self {
            device: device.to_string(),
            timeout: Duration::from_millis(DEFAULT_WRITE_TIMEOUT_MS),
            link: Link::Serial(port),
        })
    }

    /// Create a mock client that records written bytes.
    pub fn mock() -> Self {
        debug!("creating mock actuator client");
        Self {
            device: "mock".to_string(),
            timeout: Duration::from_millis(DEFAULT_WRITE_TIMEOUT_MS),
            link: Link::Mock {
                fail: false,
                sent: Vec::new(),
            },
        }
    }

    /// Create a mock client whose every write fails, simulating a broken
    /// link.
    pub fn mock_failing() -> Self {
        debug!("creating failing mock actuator client");
        Self {
            device: "mock".to_string(),
            timeout: Duration::from_millis(DEFAULT_WRITE_TIMEOUT_MS),
            link: Link::Mock {
                fail: true,
                sent: Vec::new(),
            },
        }
    }

    /// Wait for the firmware ready banner. The firmware side resets when
    /// the port opens, so commands written before this returns would be
    /// dropped.
    pub async fn handshake(&mut self) -> Result<(), ActuatorError> {
        let port = match &mut self.link {
            Link::Mock { .. } => {
                debug!("mock link: skipping handshake");
                return Ok(());
            }
            Link::Serial(port) => port,
        };

        info!(device = %self.device, "waiting for actuator ready banner");
        let wait = async {
            let mut buf = [0u8; 32];
            let mut seen: Vec<u8> = Vec::new();
            loop {
                let n = port.read(&mut buf).await?;
                if n == 0 {
                    return Err(ActuatorError::Serial(
                        "link closed during handshake".to_string(),
                    ));
                }
                seen.extend_from_slice(&buf[..n]);
                if seen
                    .windows(READY_BANNER.len())
                    .any(|window| window == READY_BANNER)
                {
                    return Ok(());
                }
            }
        };

        match tokio::time::timeout(HANDSHAKE_TIMEOUT, wait).await {
            Ok(result) => {
                result?;
                info!(device = %self.device, "actuator ready");
                Ok(())
            }
            Err(_) => Err(ActuatorError::NotReady),
        }
    }

    /// Write one command byte with a bounded timeout.
    pub async fn send(&mut self, command: AlarmCommand) -> Result<(), ActuatorError> {
        match &mut self.link {
            Link::Mock { fail, sent } => {
                if *fail {
                    return Err(ActuatorError::Serial("mock link down".to_string()));
                }
                sent.push(command.as_byte());
                Ok(())
            }
            Link::Serial(port) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                match tokio::time::timeout(self.timeout, port.write_all(&[command.as_byte()]))
                    .await
                {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(ActuatorError::from(e)),
                    Err(_) => Err(ActuatorError::Timeout(timeout_ms)),
                }
            }
        }
    }

    /// Bound for a single command write
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// Byte log of a mock link; empty for a real serial link.
    pub fn mock_sent(&self) -> &[u8] {
        match &self.link {
            Link::Mock { sent, .. } => sent,
            Link::Serial(_) => &[],
        }
    }
}
