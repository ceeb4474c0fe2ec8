//! Parsers over `xset q` output, shared by the display power and keyboard
//! layout sources

use super::Collect;

/// Display power state; defaults to ON when the output is unparsable
pub fn parse_dpms(xset_out: &str) -> String {
    let mut dpms = "DPMS ON";

    for line in xset_out.lines() {
        if line.contains("DPMS is") {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() >= 3 && fields[2] != "Enabled" {
                dpms = "DPMS OFF";
            }
        }
    }

    dpms.to_string()
}

/// Keyboard layout derived from the LED mask; defaults to US
pub fn parse_layout(xset_out: &str) -> String {
    let mut layout = "US";

    for line in xset_out.lines() {
        if line.contains("LED mask") {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() >= 10 && fields[9] == "00001000" {
                layout = "NO";
            }
        }
    }

    layout.to_string()
}

/// Display power state parsed from the xset parent value
pub struct DpmsCollector;

#[async_trait::async_trait]
impl Collect for DpmsCollector {
    async fn collect(&self, parent: &str) -> String {
        parse_dpms(parent)
    }
}

/// Keyboard layout parsed from the xset parent value
pub struct LayoutCollector;

#[async_trait::async_trait]
impl Collect for LayoutCollector {
    async fn collect(&self, parent: &str) -> String {
        parse_layout(parent)
    }
}
