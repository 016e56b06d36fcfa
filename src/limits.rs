// Input limits shared by the engine, the session and the settings store

pub const MAX_FILES: usize = 10000;
pub const MAX_TEMPLATE_LENGTH: usize = 256;
pub const MAX_FILENAME_LENGTH: usize = 200;
pub const MAX_PADDING_WIDTH: usize = 10;

// Widths accepted by `change_padding_width`
pub const PADDING_WIDTHS: [usize; 3] = [1, 2, 3];

// Representative patterns switch to 3 digits at this many files
pub const WIDE_PADDING_THRESHOLD: usize = 100;
