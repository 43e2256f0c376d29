// src/constants.rs
//
// Fixed values of the AnkiConnect and PushPlus wire protocols plus the
// defaults used when the config file leaves a key out.

/// AnkiConnect API version sent with every request.
///
/// Version 6 is the first to return `{result, error}` envelopes for every action.
pub const ANKI_CONNECT_VERSION: u8 = 6;

/// AnkiConnect listens here unless `webBindAddress`/`webBindPort` were changed.
pub const DEFAULT_ANKI_URL: &str = "http://localhost:8765";

pub const DEFAULT_DECK: &str = "0_JLPT";

pub const DEFAULT_FRONT_FIELD: &str = "Front";

/// Tag marking a note that should not be pushed.
///
/// Used in: `application/card_notifier.rs`
pub const DEFAULT_BURIED_TAG: &str = "1";

/// PushPlus message template. "txt" delivers the content verbatim.
pub const DEFAULT_PUSHPLUS_TEMPLATE: &str = "txt";

/// PushPlus delivery channel, sent as the `version` field.
pub const DEFAULT_PUSHPLUS_CHANNEL: &str = "personal";

/// Config file name, looked up in the working directory and then in
/// `<config dir>/ankinotify/`.
pub const CONFIG_FILE_NAME: &str = "config.toml";
