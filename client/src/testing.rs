//! In-memory transport and view used by the controller tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::anyhow;

use crate::socket::{CloseInfo, Connect, OnClose, OnError, OnMessage, OnOpen, Socket};
use crate::view::{ChatView, ToggleAction};

#[derive(Default)]
struct Handlers
{
	on_open: Option<OnOpen>,
	on_message: Option<OnMessage>,
	on_close: Option<OnClose>,
	on_error: Option<OnError>,
}

#[derive(Default)]
struct Wire
{
	url: String,
	sent: Vec<String>,
	close_codes: Vec<u16>,
	fail_sends: bool,
}

pub struct FakeSocket
{
	handlers: Rc<RefCell<Handlers>>,
	wire: Rc<RefCell<Wire>>,
}

impl Socket for FakeSocket
{
	fn set_on_open(&mut self, callback: OnOpen)
	{
		self.handlers.borrow_mut().on_open = Some(callback);
	}

	fn set_on_message(&mut self, callback: OnMessage)
	{
		self.handlers.borrow_mut().on_message = Some(callback);
	}

	fn set_on_close(&mut self, callback: OnClose)
	{
		self.handlers.borrow_mut().on_close = Some(callback);
	}

	fn set_on_error(&mut self, callback: OnError)
	{
		self.handlers.borrow_mut().on_error = Some(callback);
	}

	fn send(&self, text: &str) -> anyhow::Result<()>
	{
		let mut wire = self.wire.borrow_mut();
		if wire.fail_sends
		{
			return Err(anyhow!("socket is not open"));
		}
		wire.sent.push(text.to_string());
		Ok(())
	}

	fn close(&self, code: u16) -> anyhow::Result<()>
	{
		self.wire.borrow_mut().close_codes.push(code);
		Ok(())
	}
}

/// Server side of one fake connection: fires events and inspects traffic.
#[derive(Clone)]
pub struct FakeRemote
{
	handlers: Rc<RefCell<Handlers>>,
	wire: Rc<RefCell<Wire>>,
}

// Each callback is taken out of its slot while it runs so the controller may
// drop the socket from inside it.
impl FakeRemote
{
	pub fn open(&self)
	{
		let callback = self.handlers.borrow_mut().on_open.take();
		if let Some(mut callback) = callback
		{
			callback();
			self.handlers.borrow_mut().on_open = Some(callback);
		}
	}

	pub fn deliver(&self, payload: &str)
	{
		let callback = self.handlers.borrow_mut().on_message.take();
		if let Some(mut callback) = callback
		{
			callback(payload.to_string());
			self.handlers.borrow_mut().on_message = Some(callback);
		}
	}

	pub fn close(&self, code: u16)
	{
		let callback = self.handlers.borrow_mut().on_close.take();
		if let Some(mut callback) = callback
		{
			callback(CloseInfo { code, reason: String::new(), was_clean: code == shared::NORMAL_CLOSURE });
			self.handlers.borrow_mut().on_close = Some(callback);
		}
	}

	pub fn error(&self)
	{
		let callback = self.handlers.borrow_mut().on_error.take();
		if let Some(mut callback) = callback
		{
			callback();
			self.handlers.borrow_mut().on_error = Some(callback);
		}
	}

	pub fn url(&self) -> String
	{
		self.wire.borrow().url.clone()
	}

	pub fn sent(&self) -> Vec<String>
	{
		self.wire.borrow().sent.clone()
	}

	pub fn close_codes(&self) -> Vec<u16>
	{
		self.wire.borrow().close_codes.clone()
	}

	pub fn fail_sends(&self)
	{
		self.wire.borrow_mut().fail_sends = true;
	}
}

#[derive(Clone, Default)]
pub struct FakeConnector
{
	remotes: Rc<RefCell<Vec<FakeRemote>>>,
	refuse: Rc<Cell<bool>>,
}

impl FakeConnector
{
	pub fn refuse_connections(&self)
	{
		self.refuse.set(true);
	}

	pub fn connections(&self) -> usize
	{
		self.remotes.borrow().len()
	}

	pub fn last(&self) -> FakeRemote
	{
		self.remotes.borrow().last().cloned().expect("no connection was opened")
	}
}

impl Connect for FakeConnector
{
	type Socket = FakeSocket;

	fn connect(&self, url: &str) -> anyhow::Result<FakeSocket>
	{
		if self.refuse.get()
		{
			return Err(anyhow!("invalid url {}", url));
		}

		let handlers = Rc::new(RefCell::new(Handlers::default()));
		let wire = Rc::new(RefCell::new(Wire { url: url.to_string(), ..Wire::default() }));
		self.remotes.borrow_mut().push(FakeRemote { handlers: handlers.clone(), wire: wire.clone() });
		Ok(FakeSocket { handlers, wire })
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRecord
{
	pub input: String,
	pub controls_enabled: bool,
	pub toggle: Option<ToggleAction>,
	pub status: String,
	/// Message list, top to bottom.
	pub messages: Vec<String>,
	pub mutations: usize,
}

#[derive(Clone, Default)]
pub struct RecordingView
{
	record: Rc<RefCell<ViewRecord>>,
}

impl RecordingView
{
	pub fn type_text(&self, text: &str)
	{
		self.record.borrow_mut().input = text.to_string();
	}

	pub fn snapshot(&self) -> ViewRecord
	{
		self.record.borrow().clone()
	}
}

impl ChatView for RecordingView
{
	fn input_value(&self) -> String
	{
		self.record.borrow().input.clone()
	}

	fn clear_input(&mut self)
	{
		let mut record = self.record.borrow_mut();
		record.input.clear();
		record.mutations += 1;
	}

	fn set_controls_enabled(&mut self, enabled: bool)
	{
		let mut record = self.record.borrow_mut();
		record.controls_enabled = enabled;
		record.mutations += 1;
	}

	fn set_toggle(&mut self, action: ToggleAction)
	{
		let mut record = self.record.borrow_mut();
		record.toggle = Some(action);
		record.mutations += 1;
	}

	fn set_room_status(&mut self, text: &str)
	{
		let mut record = self.record.borrow_mut();
		record.status = text.to_string();
		record.mutations += 1;
	}

	fn prepend_message(&mut self, text: &str)
	{
		let mut record = self.record.borrow_mut();
		record.messages.insert(0, text.to_string());
		record.mutations += 1;
	}

	fn append_message(&mut self, text: &str)
	{
		let mut record = self.record.borrow_mut();
		record.messages.push(text.to_string());
		record.mutations += 1;
	}
}
