use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::js_error;
use crate::socket::{CloseInfo, Connect, OnClose, OnError, OnMessage, OnOpen, Socket};

/// Opens real browser WebSockets.
pub struct WebSocketConnector;

impl Connect for WebSocketConnector
{
	type Socket = BrowserSocket;

	fn connect(&self, url: &str) -> anyhow::Result<BrowserSocket>
	{
		let ws = WebSocket::new(url).map_err(js_error)?;
		Ok(BrowserSocket
		{
			ws,
			on_open: None,
			on_message: None,
			on_close: None,
			on_error: None,
		})
	}
}

/// A `web_sys::WebSocket` plus the closures registered on it. Dropping it
/// detaches every handler, so a discarded socket never reaches the controller.
pub struct BrowserSocket
{
	ws: WebSocket,
	on_open: Option<Closure<dyn FnMut(Event)>>,
	on_message: Option<Closure<dyn FnMut(MessageEvent)>>,
	on_close: Option<Closure<dyn FnMut(CloseEvent)>>,
	on_error: Option<Closure<dyn FnMut(Event)>>,
}

impl Socket for BrowserSocket
{
	fn set_on_open(&mut self, mut callback: OnOpen)
	{
		let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_: Event| callback()));
		self.ws.set_onopen(Some(closure.as_ref().unchecked_ref()));
		self.on_open = Some(closure);
	}

	fn set_on_message(&mut self, mut callback: OnMessage)
	{
		let closure = Closure::<dyn FnMut(MessageEvent)>::wrap(Box::new(move |event: MessageEvent| {
			match event.data().as_string()
			{
				Some(text) => callback(text),
				None => log::debug!("Ignoring non-text WebSocket frame"),
			}
		}));
		self.ws.set_onmessage(Some(closure.as_ref().unchecked_ref()));
		self.on_message = Some(closure);
	}

	fn set_on_close(&mut self, mut callback: OnClose)
	{
		let closure = Closure::<dyn FnMut(CloseEvent)>::wrap(Box::new(move |event: CloseEvent| {
			callback(CloseInfo
			{
				code: event.code(),
				reason: event.reason(),
				was_clean: event.was_clean(),
			})
		}));
		self.ws.set_onclose(Some(closure.as_ref().unchecked_ref()));
		self.on_close = Some(closure);
	}

	fn set_on_error(&mut self, mut callback: OnError)
	{
		let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_: Event| callback()));
		self.ws.set_onerror(Some(closure.as_ref().unchecked_ref()));
		self.on_error = Some(closure);
	}

	fn send(&self, text: &str) -> anyhow::Result<()>
	{
		self.ws.send_with_str(text).map_err(js_error)
	}

	fn close(&self, code: u16) -> anyhow::Result<()>
	{
		self.ws.close_with_code(code).map_err(js_error)
	}
}

impl Drop for BrowserSocket
{
	fn drop(&mut self)
	{
		self.ws.set_onopen(None);
		self.ws.set_onmessage(None);
		self.ws.set_onclose(None);
		self.ws.set_onerror(None);
	}
}
