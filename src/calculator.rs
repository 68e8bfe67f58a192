//! Form state for an interactive calculator.
//!
//! Holds the raw input text and the last result. Every setter recomputes
//! synchronously; a blank address means nothing has been computed yet, which
//! is reported as `None` rather than as an invalid result.

use crate::config::Settings;
use crate::models::{get_cidr_mask, ClassSuggestion, MaskMode, SubnetResult};
use crate::output::render_report;
use crate::processing::calculate;
use std::net::Ipv4Addr;

#[derive(Debug, Clone)]
pub struct Calculator {
    address: String,
    mask: String,
    mode: MaskMode,
    show_hosts: bool,
    host_limit: u64,
    result: Option<SubnetResult>,
}

impl Calculator {
    pub fn new(settings: &Settings) -> Calculator {
        Calculator {
            address: String::new(),
            mask: String::new(),
            mode: MaskMode::Cidr,
            show_hosts: false,
            host_limit: settings.host_list_limit,
            result: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    pub fn mode(&self) -> MaskMode {
        self.mode
    }

    pub fn show_hosts(&self) -> bool {
        self.show_hosts
    }

    /// The last result, `None` until an address has been entered.
    pub fn result(&self) -> Option<&SubnetResult> {
        self.result.as_ref()
    }

    pub fn is_invalid(&self) -> bool {
        self.result.as_ref().is_some_and(SubnetResult::is_invalid)
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.trim().to_string();
        self.recompute();
    }

    pub fn set_mask(&mut self, mask: &str) {
        self.mask = mask.trim().to_string();
        self.recompute();
    }

    pub fn set_mode(&mut self, mode: MaskMode) {
        self.mode = mode;
        self.recompute();
    }

    /// Switch between prefix and dotted mask entry.
    ///
    /// A mask that is valid in the current mode is rewritten in the other
    /// notation so the result does not change.
    pub fn toggle_mode(&mut self) {
        let converted = self.mode.resolve(&self.mask).ok().map(|(bits, len)| match self.mode {
            MaskMode::Cidr => Ipv4Addr::from(bits).to_string(),
            MaskMode::Dotted => len.to_string(),
        });
        if let Some(mask) = converted {
            log::debug!("toggle mask {} -> {mask}", self.mask);
            self.mask = mask;
        }
        self.mode = self.mode.toggled();
        self.recompute();
    }

    /// Pre-fill an example private network for a class.
    pub fn apply_suggestion(&mut self, suggestion: ClassSuggestion) {
        let (address, prefix) = suggestion.example();
        self.address = address.to_string();
        self.mask = match self.mode {
            MaskMode::Cidr => prefix.to_string(),
            MaskMode::Dotted => prefix
                .parse::<u8>()
                .ok()
                .and_then(|len| get_cidr_mask(len).ok())
                .map(|bits| Ipv4Addr::from(bits).to_string())
                .unwrap_or_else(|| prefix.to_string()),
        };
        self.recompute();
    }

    pub fn toggle_host_list(&mut self) {
        self.show_hosts = !self.show_hosts;
    }

    pub fn set_host_list(&mut self, show: bool) {
        self.show_hosts = show;
    }

    pub fn recompute(&mut self) {
        self.result = if self.address.is_empty() {
            None
        } else {
            Some(calculate(
                &self.address,
                &self.mask,
                Some(self.mode),
                self.host_limit,
            ))
        };
    }

    /// Text block for the clipboard, `None` when there is no valid result.
    pub fn copy_text(&self) -> Option<String> {
        match &self.result {
            Some(result) if !result.is_invalid() => Some(render_report(result, self.show_hosts, None)),
            _ => None,
        }
    }
}
