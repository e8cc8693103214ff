//! Output generation for the per-category text files.
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── 1.txt    # 政治: titles, then article bodies
//! ├── 17.txt   # 財經
//! └── ...
//! ```
//!
//! Files are only ever appended to, so repeated runs accumulate.

pub mod text;
