//! Browser chat widget: a WebSocket connection bound to a few elements of the
//! host page. The controller is transport and DOM agnostic; the `dom` and
//! `transport` modules wire it to the real browser on wasm32.

pub mod config;
pub mod controller;
pub mod socket;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::{ClientConfig, ElementIds, FrameMode, MessageOrder};
pub use controller::{ChatClient, ConnectionState};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error(value: JsValue) -> anyhow::Error
{
	anyhow::anyhow!("{:?}", value)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main_wasm()
{
	console_error_panic_hook::set_once();
	// Filtering happens through `log::set_max_level`, see `mount`.
	wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
	log::set_max_level(ClientConfig::default().log_level.to_level_filter());
}

/// Binds the widget to the page. `config` may be omitted for the defaults.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<(), JsValue>
{
	let config: ClientConfig = if config.is_undefined() || config.is_null()
	{
		ClientConfig::default()
	}
	else
	{
		serde_wasm_bindgen::from_value(config)?
	};

	log::set_max_level(config.log_level.to_level_filter());
	log::info!("WASM chat widget starting");

	match dom::mount(config)
	{
		Ok(_client) => Ok(()),
		Err(e) =>
		{
			log::error!("Failed to mount chat widget: {:#}", e);
			Err(JsValue::from_str(&format!("{:#}", e)))
		}
	}
}
