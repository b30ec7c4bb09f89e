//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Lantern Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
# host = "127.0.0.1"
# port = 8082                 # 1-65535
# max_body_bytes = 1048576    # 1024-67108864
# max_value_depth = 32        # 1-256

[window]
# title = "Lantern"
# width = 800                 # 100-16384
# height = 600                # 100-16384
# url = "about:blank"
# max_windows = 0             # 0 = unlimited, otherwise 1-65536

[logging]
# level = "INFO"              # DEBUG, INFO, WARNING, ERROR
"##
}
