//! `nanoid_dns`: identifiers safe for DNS labels and hostnames.

use nanoprov_id::DNS_ALPHABET;

use crate::lifecycle::{AlphabetPolicy, IdentifierResource, ImportKeepers, Profile};
use crate::Resource;

pub static DNS_PROFILE: Profile = Profile {
    kind: "dns",
    description: "The dns resource generates hostname/dns friendly random strings that are \
                  intended to be used as unique identifiers for other resources. The alphabet \
                  used is '0123456789abcdefghijklmnopqrstuvwxyz'.",
    alphabet: AlphabetPolicy::Fixed(DNS_ALPHABET),
    default_length: 10,
    import_keepers: ImportKeepers::Empty,
};

pub fn new_dns_resource() -> Box<dyn Resource> {
    Box::new(IdentifierResource::new(&DNS_PROFILE))
}
