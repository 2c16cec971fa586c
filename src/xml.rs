//! Raw shape of the `ipset list -o xml` document.
//!
//! Field names follow the utility's spelling. Elements the utility adds in
//! newer releases (`bucketsize`, `initval`, `numentries`, per member
//! `timeout`, ...) are ignored.

use quick_xml::events::Event;
use quick_xml::{DeError, Reader};
use serde::Deserialize;

use crate::types::Error;

/// `<ipsets>`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawIpsets {
    #[serde(rename = "ipset", default)]
    pub(crate) ipsets: Vec<RawIpset>,
}

/// `<ipset name="...">`, the name attribute is required.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawIpset {
    #[serde(rename = "@name")]
    pub(crate) name: String,
    #[serde(rename = "type", default)]
    pub(crate) typ: String,
    #[serde(default)]
    pub(crate) revision: u64,
    #[serde(default)]
    pub(crate) header: RawHeader,
    #[serde(default)]
    pub(crate) members: RawMembers,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawHeader {
    #[serde(default)]
    pub(crate) family: String,
    #[serde(default)]
    pub(crate) hashsize: u64,
    #[serde(default)]
    pub(crate) maxelem: u64,
    #[serde(default)]
    pub(crate) memsize: u64,
    #[serde(default)]
    pub(crate) references: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMembers {
    #[serde(default)]
    pub(crate) member: Vec<RawMember>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMember {
    #[serde(default)]
    pub(crate) elem: String,
}

/// Decode the list output into the raw document.
pub(crate) fn decode(output: &str) -> Result<RawIpsets, Error> {
    check_root(output)?;
    Ok(quick_xml::de::from_str(output)?)
}

/// The deserializer ignores the name of the root element, it must be `<ipsets>`.
/// Documents without any root element are left to the deserializer to reject.
fn check_root(output: &str) -> Result<(), Error> {
    let mut reader = Reader::from_str(output);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return if e.name().as_ref() == b"ipsets" {
                    Ok(())
                } else {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    Err(DeError::Custom(format!("unexpected root element <{}>", name)).into())
                };
            }
            Ok(Event::Eof) | Err(_) => return Ok(()),
            Ok(_) => {}
        }
    }
}
