//! Errors and set type names used by this crate.

use std::error::Error as StdError;
use std::io;

use derive_more::{Display, From};
use ipset_derive::SetType;
use quick_xml::DeError;

/// Errors defined in this crate.
#[derive(Debug, From, Display)]
pub enum Error {
    /// `ipset` exited with a non-zero status, the payload is its combined output.
    #[from(ignore)]
    #[display("{_0}")]
    Cmd(String),
    /// `ipset` could not be started or its output could not be read.
    #[display("{_0}")]
    Io(io::Error),
    /// The output of `ipset list -o xml` is not a valid document.
    #[display("{_0}")]
    Decode(DeError),
}

impl Error {
    pub(crate) fn cmd_contains(&self, m: &str) -> bool {
        if let Error::Cmd(message) = self {
            message.contains(m)
        } else {
            false
        }
    }

    /// The verbatim output of the utility when it exited with an error.
    pub fn output(&self) -> Option<&str> {
        match self {
            Error::Cmd(output) => Some(output),
            _ => None,
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Cmd(_) => None,
            Error::Io(err) => Some(err),
            Error::Decode(err) => Some(err),
        }
    }
}

/// A set type comprises of the storage method by which the data is stored and the data type(s) which are stored in the set.
/// Therefore the TYPENAME parameter of the create command follows the syntax
/// `TYPENAME := method:datatype[,datatype[,datatype]]`
/// where the current list of the methods are bitmap, hash, and list and the possible data types are ip, net, mac, port and iface.
pub trait SetType {
    type Method: TypeName;
    type DataType: TypeName;
}

/// A trait used for generate name for the ipset type and method, such as ip, net, etc.
pub trait TypeName {
    fn name() -> String;
}

/// Literal type name of a set type, e.g. `hash:net,port`.
pub fn type_name<T: SetType>() -> String {
    [T::Method::name(), T::DataType::name()].join(":")
}

/// list method
pub struct ListMethod;

/// bitmap method
pub struct BitmapMethod;

/// hash method
pub struct HashMethod;

/// ip address, with or without a netmask
pub struct IpDataType;

/// ip network in cidr notation
pub struct NetDataType;

/// mac address
pub struct MacDataType;

/// port number, optionally prefixed by a protocol
pub struct PortDataType;

/// interface name
pub struct IfaceDataType;

/// packet mark
pub struct MarkDataType;

/// name of another set
pub struct SetDataType;

macro_rules! impl_name {
    ($($types:ident),+) => {
        impl<$($types,)+> TypeName for ($($types),+)
            where $($types:TypeName),+ {
            fn name() -> String {
                [$($types::name(),)+].join(",")
            }
        }
    };

    ($ty:ty, $name:expr) => {
        impl TypeName for $ty {
            fn name() -> String {
                $name.into()
            }
        }
    }
}

impl_name!(ListMethod, "list");
impl_name!(BitmapMethod, "bitmap");
impl_name!(HashMethod, "hash");
impl_name!(IpDataType, "ip");
impl_name!(NetDataType, "net");
impl_name!(MacDataType, "mac");
impl_name!(PortDataType, "port");
impl_name!(IfaceDataType, "iface");
impl_name!(MarkDataType, "mark");
impl_name!(SetDataType, "set");
impl_name!(A, B);
impl_name!(A, B, C);

/// The bitmap:ip set type uses a memory range to store either IPv4 host (default) or IPv4 network addresses.
/// A bitmap:ip type of set can store up to 65536 entries.
#[derive(SetType)]
pub struct BitmapIp;

/// The bitmap:ip,mac set type uses a memory range to store IPv4 and a MAC address pairs.
#[derive(SetType)]
pub struct BitmapIpMac;

/// The bitmap:port set type uses a memory range to store port numbers and such a set can store up to 65536 ports.
#[derive(SetType)]
pub struct BitmapPort;

/// The hash:ip set type uses a hash to store IP host addresses (default) or network addresses.
/// Zero valued IP address cannot be stored in a hash:ip type of set.
#[derive(SetType)]
pub struct HashIp;

/// The hash:mac set type uses a hash to store MAC addresses.
#[derive(SetType)]
pub struct HashMac;

/// The hash:ip,mac set type uses a hash to store IP and a MAC address pairs.
#[derive(SetType)]
pub struct HashIpMac;

/// The hash:net set type uses a hash to store different sized IP network addresses.
/// Network address with zero prefix size cannot be stored in this type of sets.
#[derive(SetType)]
pub struct HashNet;

/// The hash:net,net set type uses a hash to store pairs of different sized IP network addresses.
#[derive(SetType)]
pub struct HashNetNet;

/// The hash:ip,port set type uses a hash to store IP address and port number pairs.
/// The port number is interpreted together with a protocol (default TCP) and zero protocol number cannot be used.
#[derive(SetType)]
pub struct HashIpPort;

/// The hash:net,port set type uses a hash to store different sized IP network address and port pairs.
#[derive(SetType)]
pub struct HashNetPort;

/// The hash:ip,port,ip set type uses a hash to store IP address, port number and a second IP address triples.
#[derive(SetType)]
pub struct HashIpPortIp;

/// The hash:ip,port,net set type uses a hash to store IP address, port number and IP network address triples.
#[derive(SetType)]
pub struct HashIpPortNet;

/// The hash:ip,mark set type uses a hash to store IP address and packet mark pairs.
#[derive(SetType)]
pub struct HashIpMark;

/// The hash:net,port,net set type behaves similarly to hash:ip,port,net but accepts a cidr value for both the first and last parameter.
#[derive(SetType)]
pub struct HashNetPortNet;

/// The hash:net,iface set type uses a hash to store different sized IP network address and interface name pairs.
#[derive(SetType)]
pub struct HashNetIface;

/// The list:set type uses a simple list in which you can store set names.
#[derive(SetType)]
pub struct ListSet;
