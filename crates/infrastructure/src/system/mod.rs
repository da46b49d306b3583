pub mod resolv_conf;

pub use resolv_conf::{
    parse_nameservers, read_nameservers, system_nameserver, DEFAULT_NAMESERVER, RESOLV_CONF_PATH,
};
