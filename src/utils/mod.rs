pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{ConvertError, ConvertResult, PathError, ValidationError};
pub use validation::{validate_config, validate_profile};
pub use formats::{
    IMAGE_EXTENSIONS, OUTPUT_EXTENSION, extract_filename, get_extension, is_supported_image,
    is_svg, output_file_name,
};
pub use fs::{create_dir_all, resolve_directories, validate_source_dir, write_atomic};
