//! Binds the controller to the host document.

use std::cell::Cell;

use anyhow::{Context, anyhow, bail};
use shared::PageOrigin;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlInputElement, KeyboardEvent};

use crate::config::ClientConfig;
use crate::controller::ChatClient;
use crate::js_error;
use crate::socket::Connect;
use crate::transport::WebSocketConnector;
use crate::view::{ChatView, ToggleAction};

pub type BrowserChatClient = ChatClient<WebSocketConnector, DomView>;

thread_local! {
	static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

pub struct DomView
{
	document: Document,
	input: HtmlInputElement,
	send: HtmlButtonElement,
	toggle: Element,
	messages: Element,
	status: Element,
	connect_label: String,
	disconnect_label: String,
}

/// Elements that receive user events.
#[derive(Clone)]
pub struct Controls
{
	pub input: HtmlInputElement,
	pub send: HtmlButtonElement,
	pub toggle: Element,
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> anyhow::Result<T>
{
	document
		.get_element_by_id(id)
		.with_context(|| format!("no element with id '{}'", id))?
		.dyn_into::<T>()
		.map_err(|_| anyhow!("element '{}' has an unexpected type", id))
}

impl DomView
{
	pub fn bind(document: &Document, config: &ClientConfig) -> anyhow::Result<Self>
	{
		let ids = &config.elements;
		Ok(Self
		{
			document: document.clone(),
			input: element_by_id(document, &ids.input)?,
			send: element_by_id(document, &ids.send)?,
			toggle: element_by_id(document, &ids.toggle)?,
			messages: element_by_id(document, &ids.messages)?,
			status: element_by_id(document, &ids.status)?,
			connect_label: config.connect_label.clone(),
			disconnect_label: config.disconnect_label.clone(),
		})
	}

	pub fn controls(&self) -> Controls
	{
		Controls
		{
			input: self.input.clone(),
			send: self.send.clone(),
			toggle: self.toggle.clone(),
		}
	}

	fn entry(&self, text: &str) -> Option<Element>
	{
		match self.document.create_element("div")
		{
			Ok(entry) =>
			{
				entry.set_text_content(Some(text));
				Some(entry)
			}
			Err(e) =>
			{
				log::warn!("Failed to create message entry: {:?}", e);
				None
			}
		}
	}
}

impl ChatView for DomView
{
	fn input_value(&self) -> String
	{
		self.input.value()
	}

	fn clear_input(&mut self)
	{
		self.input.set_value("");
	}

	fn set_controls_enabled(&mut self, enabled: bool)
	{
		self.input.set_disabled(!enabled);
		self.send.set_disabled(!enabled);
	}

	fn set_toggle(&mut self, action: ToggleAction)
	{
		let label = match action
		{
			ToggleAction::Connect => &self.connect_label,
			ToggleAction::Disconnect => &self.disconnect_label,
		};
		self.toggle.set_text_content(Some(label.as_str()));
	}

	fn set_room_status(&mut self, text: &str)
	{
		self.status.set_text_content(Some(text));
	}

	fn prepend_message(&mut self, text: &str)
	{
		if let Some(entry) = self.entry(text)
		{
			let first = self.messages.first_child();
			if let Err(e) = self.messages.insert_before(&entry, first.as_ref())
			{
				log::warn!("Failed to insert message: {:?}", e);
			}
		}
	}

	fn append_message(&mut self, text: &str)
	{
		if let Some(entry) = self.entry(text)
		{
			if let Err(e) = self.messages.append_child(&entry)
			{
				log::warn!("Failed to append message: {:?}", e);
			}
		}
	}
}

pub fn page_origin() -> anyhow::Result<PageOrigin>
{
	let location = gloo_utils::window().location();
	let protocol = location.protocol().map_err(js_error)?;
	let host = location.host().map_err(js_error)?;
	Ok(PageOrigin::new(protocol, host))
}

/// Routes clicks and Enter presses to the controller for the page lifetime.
pub fn listen<C: Connect + 'static>(controls: &Controls, client: &ChatClient<C, DomView>) -> anyhow::Result<()>
{
	let toggle_client = client.clone();
	let toggle_handler = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_: Event| toggle_client.toggle()));
	controls
		.toggle
		.add_event_listener_with_callback("click", toggle_handler.as_ref().unchecked_ref())
		.map_err(js_error)?;
	toggle_handler.forget();

	let send_client = client.clone();
	let send_handler = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_: Event| send_client.send_message()));
	controls
		.send
		.add_event_listener_with_callback("click", send_handler.as_ref().unchecked_ref())
		.map_err(js_error)?;
	send_handler.forget();

	let keypress_client = client.clone();
	let keypress_handler = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
		if e.key() == "Enter"
		{
			e.prevent_default();
			keypress_client.send_message();
		}
	}));
	controls
		.input
		.add_event_listener_with_callback("keypress", keypress_handler.as_ref().unchecked_ref())
		.map_err(js_error)?;
	keypress_handler.forget();

	Ok(())
}

/// Binds the page once. A failure before any listener is attached may be
/// retried; anything later counts as mounted.
pub fn mount(config: ClientConfig) -> anyhow::Result<BrowserChatClient>
{
	if MOUNTED.with(|mounted| mounted.get())
	{
		bail!("chat widget is already mounted");
	}

	let document = gloo_utils::document();
	let view = DomView::bind(&document, &config)?;
	let controls = view.controls();
	let origin = page_origin()?;

	let client = ChatClient::new(WebSocketConnector, view, origin, config);
	// Listeners attached before a failure stay on the page.
	MOUNTED.with(|mounted| mounted.set(true));
	listen(&controls, &client)?;
	log::info!("Chat widget bound to the page");
	Ok(client)
}
