//! Message formatting utilities for client display.

use denwa_shared::time::timestamp_to_local_clock;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the server's acknowledgement of our join
    pub fn format_join_ack(email: &str, room: &str, received_at: i64) -> String {
        format!(
            "\n\n============================================================\n\
             [{}] joined room '{}' as {}\n\
             ============================================================\n",
            timestamp_to_local_clock(received_at),
            room,
            email
        )
    }

    /// Format a `joined` notification about another member
    ///
    /// # Arguments
    ///
    /// * `email` - Identity of the member who joined
    /// * `socket_id` - Session ID to address calls to
    /// * `received_at` - Unix timestamp when the event arrived (milliseconds)
    pub fn format_joined(email: &str, socket_id: &str, received_at: i64) -> String {
        format!(
            "\n[{}] + {} joined (socketId: {})\n",
            timestamp_to_local_clock(received_at),
            email,
            socket_id
        )
    }

    /// Format an offer forwarded from a peer
    ///
    /// # Arguments
    ///
    /// * `peer` - Session ID of the caller
    /// * `sdp` - Offer SDP
    /// * `received_at` - Unix timestamp when the event arrived (milliseconds)
    pub fn format_incoming_call(peer: &str, sdp: &str, received_at: i64) -> String {
        format!(
            "\n\n------------------------------------------------------------\n\
             [{}] incoming call from {}\n\
             offer: {}\n\
             reply with: accept {} <sdp>\n\
             ------------------------------------------------------------\n",
            timestamp_to_local_clock(received_at),
            peer,
            sdp,
            peer
        )
    }

    /// Format an answer forwarded from a peer
    pub fn format_call_accepted(peer: &str, sdp: &str, received_at: i64) -> String {
        format!(
            "\n\n------------------------------------------------------------\n\
             [{}] call accepted by {}\n\
             answer: {}\n\
             ------------------------------------------------------------\n",
            timestamp_to_local_clock(received_at),
            peer,
            sdp
        )
    }

    /// Format the list of known peers as (email, socketId) pairs
    pub fn format_peers(peers: &[(String, String)]) -> String {
        let mut output = String::from("\nPeers:\n");
        if peers.is_empty() {
            output.push_str("(No peers yet)\n");
        } else {
            for (email, socket_id) in peers {
                output.push_str(&format!("{} - {}\n", email, socket_id));
            }
        }
        output
    }

    pub fn format_help() -> String {
        "\nCommands:\n\
         \x20 call <socketId> <sdp>    send an offer to a peer\n\
         \x20 accept <socketId> <sdp>  answer a peer's offer\n\
         \x20 peers                    list peers that joined after you\n\
         \x20 help                     show this message\n"
            .to_string()
    }

    /// Format a confirmation message after sending
    pub fn format_sent_confirmation(kind: &str, peer: &str, sent_at: i64) -> String {
        format!(
            "[{}] {} sent to {}\n",
            timestamp_to_local_clock(sent_at),
            kind,
            peer
        )
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
