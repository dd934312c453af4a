/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::{AppError, AppResult};
use crate::ipmi::registry::{IpmiCommandHandler, IpmiRequest, IpmiResponse};
use crate::providers::GuidSource;

/// Response is 16 hex bytes per IPMI Spec
pub const BMC_GUID_LEN: usize = 16;

/// Encode a textual RFC4122 UUID into its IPMI response bytes.
///
/// Ex: 61a39523-78f2-11e5-9862-e6402cfc3223
/// Per IPMI Spec 2.0 the 16 hex bytes go out with the byte order reversed:
/// Ex: 0x2332fc2c40e66298e511f2782395a361
///
/// The text must contain exactly `2 * byte_count` hex digits once the '-'
/// separators are removed; anything else is rejected. Byte pairs are read
/// left to right and written from the end of the output array, so the last
/// pair of the text lands at index 0.
pub fn encode_uuid(text: &str, byte_count: usize) -> AppResult<Vec<u8>> {
    let stripped: String = text.chars().filter(|c| *c != '-').collect();

    if stripped.len() != 2 * byte_count || !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::Format(format!(
            "invalid UUID text '{}': expected {} hex digits",
            text,
            2 * byte_count
        )));
    }

    let mut out = vec![0u8; byte_count];
    let mut loc = byte_count;
    for i in (0..stripped.len()).step_by(2) {
        let byte = u8::from_str_radix(&stripped[i..i + 2], 16)
            .map_err(|_| AppError::Format(format!("invalid UUID byte '{}'", &stripped[i..i + 2])))?;
        loc -= 1;
        out[loc] = byte;
    }

    Ok(out)
}

/// Shared shape of Get Device GUID and Get System GUID: read the UUID text
/// from the configured identity object, encode, reply with 16 bytes or an
/// error code. Never a partial GUID.
pub struct GuidCommand {
    source: Box<dyn GuidSource>,
    description: &'static str,
}

impl GuidCommand {
    /// Get Device GUID, backed by the legacy chassis object
    pub fn device(source: Box<dyn GuidSource>) -> Self {
        Self {
            source,
            description: "Get Device GUID",
        }
    }

    /// Get System GUID, backed by the BMC inventory object
    pub fn system(source: Box<dyn GuidSource>) -> Self {
        Self {
            source,
            description: "Get System GUID",
        }
    }
}

impl IpmiCommandHandler for GuidCommand {
    fn execute(&mut self, _req: &IpmiRequest) -> IpmiResponse {
        let encoded = self
            .source
            .uuid_text()
            .and_then(|text| encode_uuid(&text, BMC_GUID_LEN));
        match encoded {
            Ok(bytes) => IpmiResponse::ok(bytes),
            Err(e) => {
                log::error!("{} failed: {}", self.description, e);
                IpmiResponse::error(e.completion_code())
            }
        }
    }

    fn description(&self) -> &'static str {
        self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipmi::ipmi::{IPMI_CC_RESP_COULD_NOT_BE_PRV, IPMI_CC_UNSPECIFIED_ERROR};
    use crate::providers::StaticGuid;

    // Reference rendition of the reversal: split on '-', consume each token
    // two characters at a time, write from the end. Kept here to prove the
    // single-pass codec produces identical output.
    fn encode_uuid_tokenized(text: &str, byte_count: usize) -> Option<Vec<u8>> {
        let mut out = vec![0u8; byte_count];
        let mut loc = byte_count;
        for token in text.split('-').filter(|t| !t.is_empty()) {
            for i in (0..token.len()).step_by(2) {
                let byte = u8::from_str_radix(token.get(i..i + 2)?, 16).ok()?;
                loc = loc.checked_sub(1)?;
                out[loc] = byte;
            }
        }
        (loc == 0).then_some(out)
    }

    const SAMPLE: &str = "61a39523-78f2-11e5-9862-e6402cfc3223";

    #[test]
    fn test_byte_order_reversed() {
        let bytes = encode_uuid(SAMPLE, 16).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(
            bytes,
            [
                0x23, 0x32, 0xfc, 0x2c, 0x40, 0xe6, 0x62, 0x98, 0xe5, 0x11, 0xf2, 0x78, 0x23,
                0x95, 0xa3, 0x61
            ]
        );
    }

    #[test]
    fn test_round_trip_restores_text_order() {
        let bytes = encode_uuid(SAMPLE, 16).unwrap();
        let restored: String = bytes.iter().rev().map(|b| format!("{:02x}", b)).collect();
        assert_eq!(restored, SAMPLE.replace('-', ""));
    }

    #[test]
    fn test_separator_placement_is_irrelevant() {
        let stripped = SAMPLE.replace('-', "");
        let odd_groups = "61a395-2378f211e59862e6402cfc32-23";
        assert_eq!(
            encode_uuid(SAMPLE, 16).unwrap(),
            encode_uuid(&stripped, 16).unwrap()
        );
        assert_eq!(
            encode_uuid(odd_groups, 16).unwrap(),
            encode_uuid(SAMPLE, 16).unwrap()
        );
    }

    #[test]
    fn test_matches_tokenized_reference() {
        for input in [
            SAMPLE,
            "61a3952378f211e59862e6402cfc3223",
            "61a39523-78f2-11e5-9862e6402cfc3223",
            "00000000-0000-0000-0000-000000000001",
            "ffffffff-ffff-ffff-ffff-ffffffffffff",
        ] {
            assert_eq!(
                encode_uuid(input, 16).unwrap(),
                encode_uuid_tokenized(input, 16).unwrap(),
                "mismatch for {}",
                input
            );
        }
    }

    #[test]
    fn test_wrong_length_rejected() {
        // 30 hex digits
        assert!(encode_uuid("61a39523-78f2-11e5-9862-e6402cfc32", 16).is_err());
        // 34 hex digits
        assert!(encode_uuid("61a39523-78f2-11e5-9862-e6402cfc322344", 16).is_err());
        // odd digit count
        assert!(encode_uuid("61a39523-78f2-11e5-9862-e6402cfc322", 16).is_err());
        assert!(encode_uuid("", 16).is_err());
        assert!(encode_uuid("----", 16).is_err());
    }

    #[test]
    fn test_non_hex_rejected() {
        assert!(encode_uuid("61a39523-78f2-11e5-9862-e6402cfc32zz", 16).is_err());
    }

    #[test]
    fn test_smaller_byte_count() {
        assert_eq!(encode_uuid("0102-0304", 4).unwrap(), [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_command_responds_with_guid() {
        let mut cmd = GuidCommand::system(Box::new(StaticGuid(Some(SAMPLE.into()))));
        let rsp = cmd.execute(&IpmiRequest::default());
        assert_eq!(rsp.ccode, 0);
        assert_eq!(rsp.data.len(), BMC_GUID_LEN);
        assert_eq!(rsp.data[0], 0x23);
        assert_eq!(rsp.data[15], 0x61);
    }

    #[test]
    fn test_command_maps_malformed_text() {
        let mut cmd = GuidCommand::device(Box::new(StaticGuid(Some("junk".into()))));
        let rsp = cmd.execute(&IpmiRequest::default());
        assert_eq!(rsp.ccode, IPMI_CC_RESP_COULD_NOT_BE_PRV);
        assert!(rsp.data.is_empty());
    }

    #[test]
    fn test_command_maps_missing_source() {
        let mut cmd = GuidCommand::device(Box::new(StaticGuid(None)));
        let rsp = cmd.execute(&IpmiRequest::default());
        assert_eq!(rsp.ccode, IPMI_CC_UNSPECIFIED_ERROR);
    }
}
