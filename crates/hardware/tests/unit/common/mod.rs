/// Register file bank separation and the hardwired zero register.
pub mod register_file;
