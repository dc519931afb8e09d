// SPDX-License-Identifier: Apache-2.0

pub const DEFAULT_INTEGRATION_CODE: &str = "IN153";
pub const DEFAULT_SCRIPT_CODE: &str = "SC107";
pub const DEFAULT_PLAYBOOK_CODE: &str = "PB118";

/// Two uppercase letters for the content area, three digits for the rule.
pub const DIAGNOSTIC_CODE_PATTERN: &str = "^[A-Z]{2}[0-9]{3}$";

pub const MAX_IGNORED_CODES: usize = 64;
