use serde::Deserialize;
use shared::Frame;

/// Ids of the host document elements the widget binds to.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ElementIds
{
	pub input: String,
	pub send: String,
	pub toggle: String,
	pub messages: String,
	pub status: String,
}

impl Default for ElementIds
{
	fn default() -> Self
	{
		Self
		{
			input: "messageInput".to_string(),
			send: "sendButton".to_string(),
			toggle: "connectButton".to_string(),
			messages: "chatMessages".to_string(),
			status: "room-status".to_string(),
		}
	}
}

/// How inbound payloads are interpreted.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FrameMode
{
	/// `status:` and `chat:` prefixes, anything else dropped.
	#[default]
	Tagged,
	/// Every payload is a chat line.
	Raw,
}

impl FrameMode
{
	pub fn decode(self, payload: &str) -> Frame
	{
		match self
		{
			FrameMode::Tagged => Frame::decode(payload),
			FrameMode::Raw => Frame::Chat(payload.to_string()),
		}
	}
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum MessageOrder
{
	#[default]
	NewestFirst,
	OldestFirst,
}

/// Options accepted by `mount()`. Every field may be omitted.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig
{
	pub elements: ElementIds,
	pub endpoint_path: String,
	pub connect_label: String,
	pub disconnect_label: String,
	pub frame_mode: FrameMode,
	pub message_order: MessageOrder,
	pub log_level: log::Level,
}

impl Default for ClientConfig
{
	fn default() -> Self
	{
		Self
		{
			elements: ElementIds::default(),
			endpoint_path: shared::WS_PATH.to_string(),
			connect_label: "Connect to Chat Room".to_string(),
			disconnect_label: "Disconnect".to_string(),
			frame_mode: FrameMode::default(),
			message_order: MessageOrder::default(),
			log_level: log::Level::Info,
		}
	}
}
