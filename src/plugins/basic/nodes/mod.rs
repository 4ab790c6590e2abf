// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod create_prompt;
pub mod format_number;
pub mod get_timestamp;
pub mod is_even;
pub mod start;

pub use create_prompt::CreatePrompt;
pub use format_number::FormatNumber;
pub use get_timestamp::GetTimestamp;
pub use is_even::IsEven;
pub use start::Start;
