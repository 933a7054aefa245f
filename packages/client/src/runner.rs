//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{
    domain::should_attempt_reconnect, error::ClientError, session::run_client_session,
    ui::spawn_readline,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the signaling client with reconnection logic
///
/// Every (re)connection sends `join` again with the same email and room.
pub async fn run_client(url: String, email: String, room: String) -> Result<(), ClientError> {
    let prompt = format!("{}@{}> ", email, room);
    let mut input_rx = spawn_readline(prompt.clone());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            email,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &email, &room, &prompt, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                // 一度接続できていた場合は試行回数をリセット
                if matches!(e, ClientError::ConnectionLost) {
                    reconnect_count = 0;
                }
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!("Giving up after {} attempt(s). Exiting.", reconnect_count);
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
