use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Query parameters injected by the signer. Callers must never supply these.
pub const SERVICE: &str = "Service";
pub const OPERATION: &str = "Operation";
pub const AWS_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const ASSOCIATE_TAG: &str = "AssociateTag";
pub const TIMESTAMP: &str = "Timestamp";
pub const VERSION: &str = "Version";
pub const SIGNATURE_METHOD: &str = "SignatureMethod";
pub const SIGNATURE_VERSION: &str = "SignatureVersion";
pub const SIGNATURE: &str = "Signature";

pub const RESERVED_PARAMETERS: &[&str] = &[
    SERVICE,
    OPERATION,
    AWS_ACCESS_KEY_ID,
    ASSOCIATE_TAG,
    TIMESTAMP,
    VERSION,
    SIGNATURE_METHOD,
    SIGNATURE_VERSION,
    SIGNATURE,
];

// Fixed values of the signing scheme.
pub const SERVICE_NAME: &str = "AWSECommerceService";
pub const DEFAULT_API_VERSION: &str = "2013-08-01";
pub const SIGNATURE_METHOD_VALUE: &str = "HmacSHA256";
pub const SIGNATURE_VERSION_VALUE: &str = "2";
pub const DEFAULT_REQUEST_PATH: &str = "/onca/xml";

// The marketplace endpoint is the base domain with the locale suffix appended.
pub const BASE_DOMAIN: &str = "webservices.amazon";

// Env values used to configure the client.
pub const AMAZON_ACCESS_KEY: &str = "AMAZON_ACCESS_KEY";
pub const AMAZON_SECRET_KEY: &str = "AMAZON_SECRET_KEY";
pub const AMAZON_ASSOCIATE_TAG: &str = "AMAZON_ASSOCIATE_TAG";
pub const AMAZON_LOCALE: &str = "AMAZON_LOCALE";
pub const AMAZON_SEARCH_INDEX: &str = "AMAZON_SEARCH_INDEX";
pub const AMAZON_RESPONSE_GROUP: &str = "AMAZON_RESPONSE_GROUP";

/// AsciiSet for RFC 3986 strict encoding.
///
/// Every byte except the unreserved characters 'A'-'Z', 'a'-'z', '0'-'9',
/// '-', '.', '_' and '~' is escaped as uppercase %XX. Space becomes %20,
/// never '+'.
pub static STRICT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
