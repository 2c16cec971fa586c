//! Public view of the sets listed by `ipset`.

use serde::{Deserialize, Serialize};

use crate::types::Error;
use crate::xml::{self, RawHeader, RawIpset, RawIpsets, RawMember};

/// A snapshot of one set as reported by `ipset list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSet {
    pub name: String,
    /// Storage method and data types, e.g. `hash:net`.
    #[serde(rename = "type")]
    pub set_type: String,
    pub revision: u64,
    pub header: Header,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// `inet` or `inet6`, empty for types without a family.
    pub family: String,
    pub hash_size: u64,
    pub max_elem: u64,
    /// Kernel memory used by the set in bytes.
    #[serde(rename = "max_size")]
    pub mem_size: u64,
    /// Number of rules referring to the set.
    pub references: u64,
}

/// One entry of a set, rendered by the utility (address, cidr, address,port, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub elem: String,
}

impl IpSet {
    /// Test if `entry` is in the set. Compared byte for byte, `10.0.0.0/8` and
    /// `10.0.0.1/8` are different entries.
    pub fn contains_entry(&self, entry: &str) -> bool {
        self.members.iter().any(|member| member.elem == entry)
    }

    /// Parse the output of `ipset list -o xml`.
    pub fn from_list_xml(output: &str) -> Result<Vec<IpSet>, Error> {
        xml::decode(output).map(normalize)
    }
}

fn normalize(raw: RawIpsets) -> Vec<IpSet> {
    raw.ipsets.into_iter().map(IpSet::from).collect()
}

impl From<RawIpset> for IpSet {
    fn from(raw: RawIpset) -> Self {
        Self {
            name: raw.name,
            set_type: raw.typ,
            revision: raw.revision,
            header: raw.header.into(),
            members: raw.members.member.into_iter().map(Member::from).collect(),
        }
    }
}

impl From<RawHeader> for Header {
    fn from(raw: RawHeader) -> Self {
        Self {
            family: raw.family,
            hash_size: raw.hashsize,
            max_elem: raw.maxelem,
            mem_size: raw.memsize,
            references: raw.references,
        }
    }
}

impl From<RawMember> for Member {
    fn from(raw: RawMember) -> Self {
        Self { elem: raw.elem }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = r#"<ipsets><ipset name="s"><type>hash:net</type><revision>6</revision><header><family>inet</family><hashsize>1024</hashsize><maxelem>65536</maxelem><memsize>448</memsize><references>0</references></header><members/></ipset></ipsets>"#;

    const MEMBERS: &str = r#"<ipsets><ipset name="nets"><type>hash:net</type><revision>6</revision><header><family>inet</family><hashsize>1024</hashsize><maxelem>65536</maxelem><memsize>824</memsize><references>1</references></header><members><member><elem>10.0.0.0/8</elem></member><member><elem>192.168.0.0/16</elem></member><member><elem>172.16.0.0/12</elem></member></members></ipset></ipsets>"#;

    #[test]
    fn test_single_empty_set() {
        let sets = IpSet::from_list_xml(SINGLE).unwrap();
        assert_eq!(
            sets,
            vec![IpSet {
                name: "s".into(),
                set_type: "hash:net".into(),
                revision: 6,
                header: Header {
                    family: "inet".into(),
                    hash_size: 1024,
                    max_elem: 65536,
                    mem_size: 448,
                    references: 0,
                },
                members: vec![],
            }]
        );
    }

    #[test]
    fn test_members_in_order() {
        let sets = IpSet::from_list_xml(MEMBERS).unwrap();
        let set = &sets[0];
        let elems: Vec<_> = set.members.iter().map(|m| m.elem.as_str()).collect();
        assert_eq!(elems, ["10.0.0.0/8", "192.168.0.0/16", "172.16.0.0/12"]);
        assert!(set.contains_entry("10.0.0.0/8"));
        assert!(set.contains_entry("192.168.0.0/16"));
        assert!(set.contains_entry("172.16.0.0/12"));
        assert!(!set.contains_entry("127.0.0.0/8"));
    }

    #[test]
    fn test_contains_entry_no_canonicalization() {
        let set = IpSet {
            members: vec![Member {
                elem: "2001:db8::1".into(),
            }],
            ..Default::default()
        };
        assert!(set.contains_entry("2001:db8::1"));
        assert!(!set.contains_entry("2001:0db8::1"));
        assert!(!set.contains_entry("2001:db8::1/128"));
    }

    #[test]
    fn test_sets_in_order() {
        let output = r#"<ipsets><ipset name="b"><type>hash:ip</type></ipset><ipset name="a"><type>hash:mac</type></ipset><ipset name="c"><type>list:set</type></ipset></ipsets>"#;
        let sets = IpSet::from_list_xml(output).unwrap();
        let names: Vec<_> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert!(sets.iter().all(|s| s.members.is_empty()));
        assert_eq!(sets[2].header, Header::default());
    }

    #[test]
    fn test_normalize_is_deterministic() {
        assert_eq!(
            IpSet::from_list_xml(MEMBERS).unwrap(),
            IpSet::from_list_xml(MEMBERS).unwrap()
        );
    }

    #[test]
    fn test_json_encoding() {
        let sets = IpSet::from_list_xml(SINGLE).unwrap();
        let value = serde_json::to_value(&sets[0]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "s",
                "type": "hash:net",
                "revision": 6,
                "header": {
                    "family": "inet",
                    "hash_size": 1024,
                    "max_elem": 65536,
                    "max_size": 448,
                    "references": 0
                },
                "members": []
            })
        );

        let sets = IpSet::from_list_xml(MEMBERS).unwrap();
        let json = serde_json::to_string(&sets).unwrap();
        let decoded: Vec<IpSet> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, sets);
    }

    #[test]
    fn test_json_missing_members() {
        let json = r#"{"name":"s","type":"hash:ip","revision":4,"header":{"family":"inet6","hash_size":1024,"max_elem":65536,"max_size":200,"references":0}}"#;
        let set: IpSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.header.family, "inet6");
        assert_eq!(set.header.mem_size, 200);
        assert!(set.members.is_empty());
    }
}
