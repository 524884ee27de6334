use std::cell::RefCell;
use std::rc::{Rc, Weak};

use shared::{Frame, NORMAL_CLOSURE, OutgoingMessage, PageOrigin};

use crate::config::{ClientConfig, MessageOrder};
use crate::socket::{CloseInfo, Connect, Socket};
use crate::view::{ChatView, ToggleAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState
{
	Disconnected,
	/// Handle created, open event not seen yet. Rendered as disconnected.
	Connecting,
	Connected,
}

struct ClientState<C: Connect, V>
{
	connector: C,
	view: V,
	origin: PageOrigin,
	config: ClientConfig,

	socket: Option<C::Socket>,
	connection: ConnectionState,
	// Bumped per handle; events tagged with an older value are dropped.
	generation: u64,
}

impl<C: Connect, V: ChatView> ClientState<C, V>
{
	fn render(&mut self)
	{
		let connected = self.connection == ConnectionState::Connected;
		let action = if connected { ToggleAction::Disconnect } else { ToggleAction::Connect };
		self.view.set_toggle(action);
		self.view.set_controls_enabled(connected);
	}

	fn reset(&mut self)
	{
		self.socket = None;
		self.connection = ConnectionState::Disconnected;
		self.view.set_room_status("");
		self.render();
	}

	fn handle_open(&mut self)
	{
		log::info!("WebSocket connection established.");
		self.connection = ConnectionState::Connected;
		self.render();
	}

	fn handle_message(&mut self, payload: String)
	{
		log::debug!("Message from server: {}", payload);
		match self.config.frame_mode.decode(&payload)
		{
			Frame::Status(text) => self.view.set_room_status(&text),
			Frame::Chat(text) => match self.config.message_order
			{
				MessageOrder::NewestFirst => self.view.prepend_message(&text),
				MessageOrder::OldestFirst => self.view.append_message(&text),
			},
			Frame::Unknown(_) =>
			{
				log::debug!("Ignoring untagged frame");
			}
		}
	}

	fn handle_close(&mut self, info: CloseInfo)
	{
		log::info!(
			"WebSocket connection closed (code {}, clean: {}, reason: {:?})",
			info.code,
			info.was_clean,
			info.reason
		);
		self.reset();
	}
}

/// Chat widget controller. Owns the view and at most one connection handle.
///
/// Cloning yields another handle to the same controller, which is how DOM
/// listeners reach it.
pub struct ChatClient<C: Connect, V: ChatView>
{
	state: Rc<RefCell<ClientState<C, V>>>,
}

impl<C: Connect, V: ChatView> Clone for ChatClient<C, V>
{
	fn clone(&self) -> Self
	{
		Self { state: self.state.clone() }
	}
}

impl<C, V> ChatClient<C, V>
where
	C: Connect + 'static,
	V: ChatView + 'static,
{
	pub fn new(connector: C, view: V, origin: PageOrigin, config: ClientConfig) -> Self
	{
		let mut state = ClientState
		{
			connector,
			view,
			origin,
			config,
			socket: None,
			connection: ConnectionState::Disconnected,
			generation: 0,
		};
		state.render();

		Self { state: Rc::new(RefCell::new(state)) }
	}

	pub fn connection_state(&self) -> ConnectionState
	{
		self.state.borrow().connection
	}

	/// Action bound to the connect/disconnect control.
	pub fn toggle(&self)
	{
		let connection = self.state.borrow().connection;
		match connection
		{
			ConnectionState::Disconnected => self.connect(),
			ConnectionState::Connected => self.disconnect(),
			ConnectionState::Connecting =>
			{
				log::debug!("Toggle ignored while connecting");
			}
		}
	}

	pub fn connect(&self)
	{
		let mut guard = self.state.borrow_mut();
		let state = &mut *guard;

		if state.socket.is_some()
		{
			log::debug!("Connect ignored, a connection is already held");
			return;
		}

		let url = state.origin.endpoint_url(&state.config.endpoint_path);
		log::info!("Connecting to WebSocket at: {}", url);

		match state.connector.connect(&url)
		{
			Ok(mut socket) =>
			{
				state.generation += 1;
				self.attach(&mut socket, state.generation);
				state.socket = Some(socket);
				state.connection = ConnectionState::Connecting;
				state.render();
			}
			Err(e) =>
			{
				log::warn!("Failed to open WebSocket: {:#}", e);
				state.reset();
			}
		}
	}

	/// Sends the trimmed input text and clears the input. Blank input, or no
	/// open connection, leaves everything untouched.
	pub fn send_message(&self)
	{
		let mut guard = self.state.borrow_mut();
		let state = &mut *guard;

		if state.connection != ConnectionState::Connected
		{
			log::debug!("Not connected, cannot send message.");
			return;
		}

		let Some(message) = OutgoingMessage::from_input(&state.view.input_value())
		else
		{
			log::debug!("Input is blank, not sending.");
			return;
		};

		let Some(socket) = state.socket.as_ref()
		else
		{
			return;
		};

		match socket.send(message.as_str())
		{
			Ok(()) =>
			{
				log::debug!("Sent: {}", message.as_str());
				state.view.clear_input();
			}
			Err(e) =>
			{
				log::warn!("Failed to send message: {:#}", e);
			}
		}
	}

	/// Requests a normal closure and returns to Disconnected right away. The
	/// handle is discarded, so its late close event is never seen.
	pub fn disconnect(&self)
	{
		let mut guard = self.state.borrow_mut();
		let state = &mut *guard;

		let Some(socket) = state.socket.as_ref()
		else
		{
			log::debug!("Disconnect ignored, no connection held");
			return;
		};

		log::info!("Closing WebSocket connection now.");
		if let Err(e) = socket.close(NORMAL_CLOSURE)
		{
			log::warn!("Error sending close command: {:#}", e);
		}
		state.reset();
	}

	fn attach(&self, socket: &mut C::Socket, generation: u64)
	{
		let weak = Rc::downgrade(&self.state);
		socket.set_on_open(Box::new(move || dispatch(&weak, generation, |state| state.handle_open())));

		let weak = Rc::downgrade(&self.state);
		socket.set_on_message(Box::new(move |payload| {
			dispatch(&weak, generation, |state| state.handle_message(payload))
		}));

		let weak = Rc::downgrade(&self.state);
		socket.set_on_close(Box::new(move |info| dispatch(&weak, generation, |state| state.handle_close(info))));

		let weak = Rc::downgrade(&self.state);
		socket.set_on_error(Box::new(move || {
			dispatch(&weak, generation, |_| log::warn!("WebSocket error on connection #{}", generation))
		}));
	}
}

fn dispatch<C, V, F>(state: &Weak<RefCell<ClientState<C, V>>>, generation: u64, handler: F)
where
	C: Connect,
	V: ChatView,
	F: FnOnce(&mut ClientState<C, V>),
{
	let Some(state) = state.upgrade()
	else
	{
		return;
	};
	let mut state = state.borrow_mut();

	if state.generation != generation || state.socket.is_none()
	{
		log::debug!("Dropping event from discarded connection #{}", generation);
		return;
	}
	handler(&mut *state);
}
