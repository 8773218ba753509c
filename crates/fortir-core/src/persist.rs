use crate::module::Module;
use std::fs;
use std::io;
use std::path::Path;

pub fn save_module(module: &Module, path: impl AsRef<Path>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(module)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json)?;
    Ok(())
}

pub fn load_module(path: impl AsRef<Path>) -> io::Result<Module> {
    let json = fs::read_to_string(path)?;
    let module =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FuncDecl;
    use crate::types::{FuncType, Type};
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_load_module() {
        let mut module = Module::new("demo");
        module
            .declare_func(FuncDecl::new(
                "_FortranAPauseStatement",
                FuncType::new(vec![], Type::Unit),
                false,
            ))
            .unwrap();

        let temp_file = NamedTempFile::new().unwrap();
        save_module(&module, temp_file.path()).unwrap();

        let loaded = load_module(temp_file.path()).unwrap();
        assert_eq!(loaded.name, "demo");
        assert!(loaded.find_decl("_FortranAPauseStatement").is_some());
    }
}
