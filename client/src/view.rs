/// Action currently bound to the connect/disconnect toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction
{
	Connect,
	Disconnect,
}

/// Everything the controller needs from the host page.
pub trait ChatView
{
	fn input_value(&self) -> String;
	fn clear_input(&mut self);

	/// Enables or disables both the text input and the send control.
	fn set_controls_enabled(&mut self, enabled: bool);
	fn set_toggle(&mut self, action: ToggleAction);

	fn set_room_status(&mut self, text: &str);
	fn prepend_message(&mut self, text: &str);
	fn append_message(&mut self, text: &str);
}
