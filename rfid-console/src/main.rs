//! RFID Reader Console
//!
//! Locates an attached RFID reader (Arduino or CH340 serial adapter), opens
//! its serial port, and prints every tag identifier it reports. Runs until
//! the reader goes away, the operator presses Enter, or Ctrl-C.

mod console;
mod settings;

use rfid_detect::{DeviceScanner, HardwareMatcher};
use rfid_session::{decode_bytes, SerialSession, SessionEvent};
use settings::Settings;
use tokio::sync::oneshot;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never interleave with the status lines
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rfid_reader=info,rfid_detect=info,rfid_session=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    console::banner();

    let settings = Settings::load_or_init();
    debug!("Using settings {:?}", settings);

    run(settings).await;
}

/// Keep the last status lines on screen until the operator dismisses them
///
/// Returns at once when no terminal is attached.
async fn wait_for_operator(enter: oneshot::Receiver<()>) {
    console::press_enter();
    tokio::select! {
        _ = enter => {}
        _ = tokio::signal::ctrl_c() => {}
    }
}

/// Detect the reader, open it, and print tags until shutdown
async fn run(settings: Settings) {
    let records = match DeviceScanner::new().scan() {
        Ok(records) => records,
        Err(e) => {
            error!("Device query failed: {e}");
            console::query_failed(&e);
            wait_for_operator(spawn_enter_listener()).await;
            return;
        }
    };

    let matcher = HardwareMatcher::with_config(settings.matching);
    let Some(reader) = matcher.find_reader(records) else {
        console::not_found();
        wait_for_operator(spawn_enter_listener()).await;
        return;
    };
    console::found(&reader);

    let mut session = match SerialSession::open(&reader.info.port_name, &settings.session) {
        Ok(session) => session,
        Err(e) => {
            error!("{e}");
            console::open_failed(&e.to_string());
            wait_for_operator(spawn_enter_listener()).await;
            return;
        }
    };
    console::status(session.is_open());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut enter = spawn_enter_listener();
    let mut enter_open = true;

    loop {
        tokio::select! {
            event = session.next_event() => match event {
                Some(SessionEvent::Data(chunk)) => {
                    debug!("Serial data received ({} bytes)", chunk.len());
                    if let Some(tag) = decode_bytes(&chunk) {
                        info!("Tag {} read on {}", tag, session.port_name());
                        console::tag(&tag);
                    }
                }
                Some(SessionEvent::Error(message)) => console::serial_error(&message),
                Some(SessionEvent::Closed) | None => {
                    console::status(false);
                    if enter_open {
                        console::press_enter();
                        tokio::select! {
                            _ = &mut enter => {}
                            _ = &mut shutdown => {}
                        }
                    }
                    return;
                }
            },

            _ = &mut shutdown => {
                info!("Interrupted, shutting down");
                break;
            }

            pressed = &mut enter, if enter_open => match pressed {
                Ok(()) => {
                    info!("Operator requested exit");
                    break;
                }
                // No terminal attached; keep running until Ctrl-C
                Err(_) => enter_open = false,
            },
        }
    }

    session.close();
    console::status(false);
}

/// Resolve once the operator presses Enter
///
/// Stdin is read on a plain thread so a pending read never holds up runtime
/// shutdown.
fn spawn_enter_listener() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        if matches!(std::io::stdin().read_line(&mut line), Ok(n) if n > 0) {
            let _ = tx.send(());
        }
    });
    rx
}
