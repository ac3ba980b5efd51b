use keel_core::{LiteralWriter, Result};

/// SQL Server literal syntax: `N'...'` unicode strings, `0x...` binary, and
/// JSON rendered as a string literal (closing the base provider gap).
#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlLiteralWriter;

impl LiteralWriter for MssqlLiteralWriter {
    fn write_bool(&self, out: &mut String, value: bool) {
        out.push(['0', '1'][value as usize]);
    }

    fn write_string(&self, out: &mut String, value: &str) {
        out.push_str("N'");
        self.write_escaped(out, value, '\'', "''");
        out.push('\'');
    }

    fn write_blob(&self, out: &mut String, value: &[u8]) {
        out.push_str("0x");
        out.push_str(&hex::encode_upper(value));
    }

    fn write_json(&self, out: &mut String, value: &serde_json::Value) -> Result<()> {
        self.write_string(out, &value.to_string());
        Ok(())
    }
}
