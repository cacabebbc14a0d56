use crate::{
    commands::builtin_specs,
    constants::{PROGRAM_DESCRIPTION, PROGRAM_NAME, PROGRAM_VERSION},
    error::Result,
    plugin::PluginLoader,
    preflight,
    registry::{Dispatched, ProgramRegistry},
    settings::Settings,
};

/// Main CLI runner: populates the command registry and dispatches argv to it.
pub struct Runner {
    settings: Settings,
}

impl Runner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Creates the registry and fills it: plugins first, then the built-in commands.
    /// Built-in names are reserved while plugins load, so a clash names the plugin.
    pub fn build_registry(&self) -> Result<ProgramRegistry> {
        let mut registry =
            ProgramRegistry::new(PROGRAM_NAME, PROGRAM_VERSION, PROGRAM_DESCRIPTION);
        let builtins = builtin_specs(&self.settings);

        let plugins = PluginLoader::new(&self.settings.plugins_dir)
            .with_reserved(builtins.iter().map(|spec| spec.name.clone()))
            .load(&mut registry)?;
        log::debug!("Loaded {} plugin(s): {plugins:?}", plugins.len());

        for spec in builtins {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    /// Builds the registry and dispatches `argv` (binary name included).
    pub fn run<I, T>(&self, argv: I) -> Result<Dispatched>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut registry = self.build_registry()?;
        registry.dispatch(argv)
    }
}

/// Main entry point for CLI execution
pub fn run(argv: Vec<String>) -> Result<Dispatched> {
    preflight::run_checks()?;
    let settings = Settings::load()?;
    Runner::new(settings).run(argv)
}
