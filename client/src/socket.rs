//! Transport seam. The controller only ever talks to these traits, the
//! browser `WebSocket` lives behind them in `transport`.

/// Details of a close event, kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CloseInfo
{
	pub code: u16,
	pub reason: String,
	pub was_clean: bool,
}

pub type OnOpen = Box<dyn FnMut() + 'static>;
pub type OnMessage = Box<dyn FnMut(String) + 'static>;
pub type OnClose = Box<dyn FnMut(CloseInfo) + 'static>;
pub type OnError = Box<dyn FnMut() + 'static>;

/// A single live connection handle.
///
/// Handlers fire asynchronously, never from inside `send` or `close`.
pub trait Socket
{
	fn set_on_open(&mut self, callback: OnOpen);
	/// Text frames only; binary frames are not delivered.
	fn set_on_message(&mut self, callback: OnMessage);
	fn set_on_close(&mut self, callback: OnClose);
	fn set_on_error(&mut self, callback: OnError);

	fn send(&self, text: &str) -> anyhow::Result<()>;
	fn close(&self, code: u16) -> anyhow::Result<()>;
}

/// Creates a fresh handle per connection attempt.
pub trait Connect
{
	type Socket: Socket + 'static;

	fn connect(&self, url: &str) -> anyhow::Result<Self::Socket>;
}
