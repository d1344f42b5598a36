//! Drives a whole module through the stripper into a directory tree.
//!
//! Output layout mirrors a C# project: a directory named after the module,
//! a `Properties/AssemblyInfo.cs` with neutral assembly attributes, and one
//! `.cs` file per top-level type placed under its namespace path. Progress
//! is published on the shared channel as types are processed.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    metadata::module::{Module, PRIVATE_IMPLEMENTATION_DETAILS},
    strip::{progress::StripProgress, stripper::TypeStripper, StripOptions},
    Error, Result,
};

/// Walks every top-level type of a module and strips it to disk.
pub struct ModuleWalker<'a> {
    module: &'a Module,
    options: &'a StripOptions,
    progress: Arc<StripProgress>,
}

impl<'a> ModuleWalker<'a> {
    /// Create a walker for one module. The progress channel is shared so a
    /// host UI can observe the run from another thread.
    #[must_use]
    pub fn new(module: &'a Module, options: &'a StripOptions, progress: Arc<StripProgress>) -> Self {
        ModuleWalker {
            module,
            options,
            progress,
        }
    }

    /// Strip the whole module into `output_root/<module name>/`.
    ///
    /// Exactly one file is written per top-level type; nested types land
    /// inside their enclosing type's file. The completion fraction advances
    /// by `1/n` per top-level type, reaching `1.0` on success.
    pub fn run(&self) -> Result<()> {
        if self.options.output_root.as_os_str().is_empty() {
            return Err(Error::Config("Output root must not be empty".to_string()));
        }
        let module_root = self.options.output_root.join(&self.module.name);
        let types: Vec<_> = self.module.top_level().cloned().collect();
        let delta = if types.is_empty() {
            0.0
        } else {
            1.0 / types.len() as f32
        };
        self.progress.set_fraction(0.0);

        self.ensure_directories(&module_root.join("Properties"))?;
        self.write_assembly_info(&module_root)?;

        let stripper = TypeStripper::new(self.options, &self.progress);
        for ty in &types {
            if ty.name == PRIVATE_IMPLEMENTATION_DETAILS {
                continue;
            }
            self.progress
                .set_action(format!("Exporting {}", ty.fullname()))?;

            let mut directory = module_root.clone();
            if let Some(namespace) = &ty.namespace {
                directory = namespace
                    .split('.')
                    .fold(directory, |path, segment| path.join(segment));
            }
            self.ensure_directories(&directory)?;

            // The arity marker is not a valid filename character everywhere
            let file_name = format!("{}.cs", ty.name.replace('`', "_"));
            let file = File::create(directory.join(file_name))?;
            let mut writer = BufWriter::new(file);
            stripper.strip_start(ty, &mut writer)?;
            writer.flush()?;

            self.progress.add_fraction(delta);
        }
        Ok(())
    }

    /// Create `dir` and any missing ancestors, stopping the ancestor walk
    /// at the configured base path.
    fn ensure_directories(&self, dir: &Path) -> Result<()> {
        if dir.as_os_str().is_empty() || dir == self.options.base_path || dir.exists() {
            return Ok(());
        }
        if let Some(parent) = dir.parent() {
            self.ensure_directories(parent)?;
        }
        fs::create_dir(dir)?;
        Ok(())
    }

    fn write_assembly_info(&self, module_root: &Path) -> Result<()> {
        let name = &self.module.name;
        let path: PathBuf = module_root.join("Properties").join("AssemblyInfo.cs");
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "using System.Reflection;")?;
        writeln!(writer, "using System.Runtime.CompilerServices;")?;
        writeln!(writer, "using System.Runtime.InteropServices;")?;
        writeln!(writer, "[assembly: AssemblyTitle(\"{name}\")]")?;
        writeln!(writer, "[assembly: AssemblyDescription(\"\")]")?;
        writeln!(writer, "[assembly: AssemblyConfiguration(\"\")]")?;
        writeln!(writer, "[assembly: AssemblyCompany(\"\")]")?;
        writeln!(writer, "[assembly: AssemblyProduct(\"{name}\")]")?;
        writeln!(writer, "[assembly: AssemblyCopyright(\"\")]")?;
        writeln!(writer, "[assembly: AssemblyTrademark(\"\")]")?;
        writeln!(writer, "[assembly: AssemblyCulture(\"\")]")?;
        writeln!(writer, "[assembly: ComVisible(false)]")?;
        writeln!(writer, "[assembly: AssemblyVersion(\"0.0.0.0\")]")?;
        writeln!(writer, "[assembly: AssemblyFileVersion(\"0.0.0.0\")]")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::typesystem::{TypeAttributes, TypeBuilder};

    #[test]
    fn empty_output_root_is_a_configuration_fault() {
        let module = Module::new("Game");
        let options = StripOptions::new("");
        let walker = ModuleWalker::new(&module, &options, Arc::new(StripProgress::new()));
        assert!(matches!(walker.run(), Err(Error::Config(_))));
    }

    #[test]
    fn writes_one_file_per_top_level_type() -> crate::Result<()> {
        let dir = tempfile::tempdir()?;
        let module = Module::new("Game");
        TypeBuilder::new(&module, "Bomb")
            .namespace("Game.Core")
            .flags(TypeAttributes::PUBLIC)
            .build()?;
        TypeBuilder::new(&module, "List`1")
            .namespace("Game.Core")
            .flags(TypeAttributes::PUBLIC)
            .build()?;

        let options = StripOptions::new(dir.path());
        let progress = Arc::new(StripProgress::new());
        ModuleWalker::new(&module, &options, progress.clone()).run()?;

        let root = dir.path().join("Game");
        assert!(root.join("Properties").join("AssemblyInfo.cs").is_file());
        assert!(root.join("Game").join("Core").join("Bomb.cs").is_file());
        assert!(root.join("Game").join("Core").join("List_1.cs").is_file());
        assert!((progress.fraction() - 1.0).abs() < 1e-6);
        assert_eq!(progress.current_action()?, "Exporting Game.Core.List`1");
        Ok(())
    }
}
