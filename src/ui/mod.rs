// UI module - console front end
//
// This module contains:
// - ConsolePrompt: Terminal implementation of OverridePrompt and SetupPrompt

pub mod console;

pub use console::ConsolePrompt;
