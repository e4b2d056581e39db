//! MQTT remote control
//!
//! Connects to an MQTT broker and subscribes to a topic. JSON payloads carry
//! partial parameter updates and commands, forwarded to the main loop over a
//! channel. Rendering never blocks on the network.

use rumqttc::{Client, Event, MqttOptions, Packet, QoS};
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const DEFAULT_PORT: u16 = 1883;
const DEFAULT_TOPIC: &str = "mandala";

/// One remote update. Every field is optional; absent fields leave the
/// current configuration untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControlMessage {
    pub petals: Option<u32>,
    pub layers: Option<u32>,
    pub base_hue: Option<f32>,
    pub complexity: Option<f32>,
    pub rotation: Option<f32>,
    /// Planet preset by name (sets hue and breathing frequency)
    pub planet: Option<String>,
    pub flower_of_life: Option<bool>,
    pub golden_spiral: Option<bool>,
    pub fractal_mode: Option<bool>,
    pub breathing: Option<bool>,
    /// Request a PNG export to the given path
    pub export: Option<String>,
}

/// MQTT client that receives control messages in a background thread
pub struct Controller {
    receiver: Receiver<ControlMessage>,
    _thread: thread::JoinHandle<()>,
}

impl Controller {
    /// Connect to the broker and subscribe.
    /// Fails immediately if the broker is unreachable.
    pub fn new(host: &str, topic: &str) -> Result<Self, String> {
        let topic = if topic.is_empty() { DEFAULT_TOPIC } else { topic };

        let mut options = MqttOptions::new("mandala", host, DEFAULT_PORT);
        options.set_keep_alive(Duration::from_secs(30));

        let (client, mut connection) = Client::new(options, 10);

        client
            .subscribe(topic, QoS::AtMostOnce)
            .map_err(|e| format!("Failed to subscribe to topic '{}': {}", topic, e))?;

        // Test connection by polling once - fail fast if broker unreachable
        match connection.iter().next() {
            Some(Ok(_)) => {},
            Some(Err(e)) => {
                return Err(format!(
                    "Failed to connect to MQTT broker at {}:{} - {}",
                    host, DEFAULT_PORT, e
                ));
            },
            None => {
                return Err(format!(
                    "Failed to connect to MQTT broker at {}:{} - connection closed",
                    host, DEFAULT_PORT
                ));
            },
        }

        let (sender, receiver) = mpsc::channel();
        let topic_owned = topic.to_string();

        let handle = thread::spawn(move || {
            Self::message_loop(connection, &sender, &topic_owned);
        });

        eprintln!(
            "MQTT: Connected to {}:{}, subscribed to '{}'",
            host, DEFAULT_PORT, topic
        );

        Ok(Self {
            receiver,
            _thread: handle,
        })
    }

    fn message_loop(
        mut connection: rumqttc::Connection,
        sender: &Sender<ControlMessage>,
        topic: &str,
    ) {
        for event in connection.iter() {
            match event {
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    if publish.topic != topic {
                        continue;
                    }
                    let Ok(text) = String::from_utf8(publish.payload.to_vec()) else {
                        continue;
                    };
                    match serde_json::from_str::<ControlMessage>(text.trim()) {
                        Ok(msg) => {
                            if sender.send(msg).is_err() {
                                // Main thread gone, exit
                                break;
                            }
                        },
                        Err(e) => eprintln!("MQTT: ignoring malformed message: {}", e),
                    }
                },
                Ok(_) => {},
                Err(e) => {
                    eprintln!("MQTT error: {}", e);
                    // Keep going - the connection may recover
                },
            }
        }
    }

    /// Drain pending messages (non-blocking), oldest first
    pub fn poll(&self) -> Vec<ControlMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Default MQTT topic
    pub fn default_topic() -> &'static str {
        DEFAULT_TOPIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_messages_deserialize() {
        let msg: ControlMessage = serde_json::from_str(r#"{"petals": 13}"#).unwrap();
        assert_eq!(msg.petals, Some(13));
        assert!(msg.layers.is_none());
        assert!(msg.planet.is_none());
    }

    #[test]
    fn full_messages_deserialize() {
        let msg: ControlMessage = serde_json::from_str(
            r#"{
                "petals": 21, "layers": 6, "base_hue": 300.0, "complexity": 2.5,
                "rotation": 45.0, "planet": "Neptune", "flower_of_life": true,
                "golden_spiral": false, "fractal_mode": true, "breathing": true,
                "export": "out.png"
            }"#,
        )
        .unwrap();
        assert_eq!(msg.planet.as_deref(), Some("Neptune"));
        assert_eq!(msg.export.as_deref(), Some("out.png"));
        assert_eq!(msg.flower_of_life, Some(true));
    }

    #[test]
    fn malformed_json_is_an_error_not_a_panic() {
        assert!(serde_json::from_str::<ControlMessage>("petals=13").is_err());
    }
}
