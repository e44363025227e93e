//! The option registry: declared options plus captured positional arguments.

use crate::error::{misuse, Error, Result};
use crate::option::{
    is_abbreviation_char, is_name_char, Bound, FromValue, Opt, OptionDef, OptionKind, Value,
};

/// Capacities of a registry. Exceeding either is a declaration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_options: usize,
    pub max_args: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_options: 64,
            max_args: 256,
        }
    }
}

/// Index of a defined option, returned by [`Registry::define`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionHandle(usize);

impl OptionHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered set of typed options and the positional arguments of one parse.
///
/// Every option always holds a well-defined value: its declared default
/// until the parser accepts a literal for it.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    limits: Limits,
    options: Vec<OptionDef>,
    args: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Registry {
            limits,
            options: Vec::with_capacity(limits.max_options),
            args: Vec::new(),
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Register an option.
    ///
    /// # Panics
    ///
    /// On any declaration error: invalid or duplicate name or abbreviation,
    /// a bad range, a default outside its range, or a full registry.
    pub fn define(&mut self, opt: Opt) -> OptionHandle {
        if self.options.len() >= self.limits.max_options {
            misuse(format!(
                "cannot define --{}: registry is full ({} options); raise Limits::max_options",
                opt.name, self.limits.max_options
            ));
        }
        if opt.name.is_empty() {
            misuse("option name must not be empty");
        }
        if let Some(bad) = opt.name.chars().find(|c| !is_name_char(*c)) {
            misuse(format!("invalid character {:?} in option name {:?}", bad, opt.name));
        }
        if let Some(c) = opt.abbreviation {
            if !is_abbreviation_char(c) {
                misuse(format!("invalid abbreviation {:?} for option --{}", c, opt.name));
            }
        }
        if self.find_by_name(&opt.name).is_some() {
            misuse(format!("duplicate option name: {}", opt.name));
        }
        if let Some(c) = opt.abbreviation {
            if let Some(idx) = self.find_by_abbreviation(c) {
                misuse(format!(
                    "duplicate abbreviation -{} for --{} (already used by --{})",
                    c, opt.name, self.options[idx].name
                ));
            }
        }

        let kind = opt.value.kind();
        if kind == OptionKind::Flag && opt.required {
            misuse(format!("flag --{} cannot be required", opt.name));
        }

        let mut value = opt.value;
        if let Some((lo, hi)) = opt.range {
            apply_range(&opt.name, &mut value, lo, hi);
        }

        tracing::debug!(name = %opt.name, %kind, "defined option");
        self.options.push(OptionDef {
            name: opt.name,
            abbreviation: opt.abbreviation,
            description: opt.description,
            required: opt.required,
            show_default: opt.show_default,
            found: false,
            raw_value: None,
            default: value.clone(),
            value,
        });
        OptionHandle(self.options.len() - 1)
    }

    /// Shorthand for `define(Opt::flag(name)...)`.
    pub fn define_flag(
        &mut self,
        name: &str,
        abbreviation: Option<char>,
        description: &str,
    ) -> OptionHandle {
        let mut opt = Opt::flag(name).description(description);
        if let Some(c) = abbreviation {
            opt = opt.short(c);
        }
        self.define(opt)
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub(crate) fn find_by_name(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.name == name)
    }

    pub(crate) fn find_by_abbreviation(&self, c: char) -> Option<usize> {
        self.options.iter().position(|o| o.abbreviation == Some(c))
    }

    pub(crate) fn option_mut(&mut self, idx: usize) -> &mut OptionDef {
        &mut self.options[idx]
    }

    /// The option behind `name`; an unknown name is a declaration error.
    #[track_caller]
    pub fn lookup(&self, name: &str) -> &OptionDef {
        match self.find_by_name(name) {
            Some(idx) => &self.options[idx],
            None => misuse(format!("no option named --{} is defined", name)),
        }
    }

    pub fn option(&self, handle: OptionHandle) -> &OptionDef {
        &self.options[handle.0]
    }

    /// Options in definition order.
    pub fn options(&self) -> impl Iterator<Item = &OptionDef> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    // ------------------------------------------------------------------
    // Typed queries
    // ------------------------------------------------------------------

    /// Current value of `name` as `T`.
    ///
    /// # Panics
    ///
    /// If `name` is not defined or its kind does not convert to `T`.
    #[track_caller]
    pub fn get<T: FromValue>(&self, name: &str) -> T {
        let opt = self.lookup(name);
        match T::from_value(&opt.value) {
            Some(v) => v,
            None => misuse(format!(
                "option --{} is a {} option, queried as {}",
                name,
                opt.kind(),
                T::EXPECTED
            )),
        }
    }

    #[track_caller]
    pub fn get_integer(&self, name: &str) -> i64 {
        self.get(name)
    }

    #[track_caller]
    pub fn get_real(&self, name: &str) -> f64 {
        self.get(name)
    }

    /// Value of a logical option or a flag.
    #[track_caller]
    pub fn get_logical(&self, name: &str) -> bool {
        self.get(name)
    }

    #[track_caller]
    pub fn get_string(&self, name: &str) -> &str {
        let opt = self.lookup(name);
        match &opt.value {
            Value::String(s) => s.as_str(),
            _ => misuse(format!(
                "option --{} is a {} option, queried as string",
                name,
                opt.kind()
            )),
        }
    }

    /// Whether `name` was given on the command line.
    #[track_caller]
    pub fn option_found(&self, name: &str) -> bool {
        self.lookup(name).found
    }

    /// First required option, in definition order, that was not given.
    pub fn check_required_options(&self) -> Result<()> {
        match self.options.iter().find(|o| o.required && !o.found) {
            Some(missing) => Err(Error::MissingRequired(missing.name.clone())),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Positional arguments
    // ------------------------------------------------------------------

    pub(crate) fn push_arg(&mut self, arg: &str) {
        if self.args.len() >= self.limits.max_args {
            misuse(format!(
                "too many positional arguments (capacity {}); raise Limits::max_args",
                self.limits.max_args
            ));
        }
        self.args.push(arg.to_string());
    }

    pub fn num_args(&self) -> usize {
        self.args.len()
    }

    /// Positional argument `index`, counting from 1.
    pub fn get_arg(&self, index: usize) -> Result<&str> {
        if index == 0 || index > self.args.len() {
            return Err(Error::ArgIndex {
                index,
                count: self.args.len(),
            });
        }
        Ok(&self.args[index - 1])
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Install declared bounds on a numeric value and check the default fits.
fn apply_range(name: &str, value: &mut Value, lo: Bound, hi: Bound) {
    match value {
        Value::Integer { value, min, max } => {
            let (Bound::Integer(lo), Bound::Integer(hi)) = (lo, hi) else {
                misuse(format!("integer option --{} needs integer bounds", name));
            };
            if lo > hi {
                misuse(format!("option --{}: minimum {} exceeds maximum {}", name, lo, hi));
            }
            if *value < lo || *value > hi {
                misuse(format!(
                    "option --{}: default {} is outside the range {} to {}",
                    name, value, lo, hi
                ));
            }
            *min = lo;
            *max = hi;
        }
        Value::Real { value, min, max } => {
            let as_real = |b: Bound| match b {
                Bound::Integer(i) => i as f64,
                Bound::Real(r) => r,
            };
            let (lo, hi) = (as_real(lo), as_real(hi));
            if lo.is_nan() || hi.is_nan() || lo > hi {
                misuse(format!("option --{}: invalid range {} to {}", name, lo, hi));
            }
            if *value < lo || *value > hi {
                misuse(format!(
                    "option --{}: default {} is outside the range {} to {}",
                    name, value, lo, hi
                ));
            }
            *min = lo;
            *max = hi;
        }
        other => misuse(format!(
            "option --{} is a {} option and cannot take a range",
            name,
            other.kind()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        let mut reg = Registry::new();
        reg.define(Opt::integer("count", 1).range(0, 10).short('c'));
        reg.define(Opt::flag("verbose").short('v'));
        reg.define(Opt::string("name", "x"));
        reg.define(Opt::real("ratio", 0.25));
        reg.define(Opt::logical("color", true));
        reg
    }

    #[test]
    fn defaults_are_visible_before_parsing() {
        let reg = sample();
        assert_eq!(reg.get_integer("count"), 1);
        assert!(!reg.get_logical("verbose"));
        assert_eq!(reg.get_string("name"), "x");
        assert_eq!(reg.get_real("ratio"), 0.25);
        assert!(reg.get_logical("color"));
        assert_eq!(reg.get::<String>("name"), "x");
        assert!(!reg.option_found("count"));
        assert_eq!(reg.num_args(), 0);
    }

    #[test]
    fn handles_index_in_definition_order() {
        let mut reg = Registry::new();
        let a = reg.define(Opt::flag("alpha"));
        let b = reg.define(Opt::integer("beta", 0));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(reg.option(b).name(), "beta");
        assert_eq!(reg.option(b).kind(), OptionKind::Integer);
        let names: Vec<&str> = reg.options().map(|o| o.name()).collect();
        assert_eq!(names, ["alpha", "beta"]);
    }

    #[test]
    fn define_flag_shorthand() {
        let mut reg = Registry::new();
        let h = reg.define_flag("quiet", Some('q'), "Say less.");
        let opt = reg.option(h);
        assert!(opt.is_flag());
        assert_eq!(opt.abbreviation(), Some('q'));
        assert_eq!(opt.description(), "Say less.");
    }

    #[test]
    fn required_options_reported_in_definition_order() {
        let mut reg = Registry::new();
        reg.define(Opt::string("input", "").required());
        reg.define(Opt::string("output", "").required());
        assert_eq!(
            reg.check_required_options(),
            Err(Error::MissingRequired("input".into()))
        );
        reg.option_mut(0).assign("in.txt").unwrap();
        assert_eq!(
            reg.check_required_options(),
            Err(Error::MissingRequired("output".into()))
        );
        reg.option_mut(1).assign("out.txt").unwrap();
        assert_eq!(reg.check_required_options(), Ok(()));
    }

    #[test]
    fn positional_index_is_one_based() {
        let mut reg = Registry::new();
        reg.push_arg("first");
        reg.push_arg("second");
        assert_eq!(reg.get_arg(1), Ok("first"));
        assert_eq!(reg.get_arg(2), Ok("second"));
        assert_eq!(reg.get_arg(0), Err(Error::ArgIndex { index: 0, count: 2 }));
        assert_eq!(reg.get_arg(3), Err(Error::ArgIndex { index: 3, count: 2 }));
        assert_eq!(reg.args(), ["first", "second"]);
    }

    #[test]
    fn real_range_accepts_integer_bounds() {
        let mut reg = Registry::new();
        reg.define(Opt::real("ratio", 0.5).range(0, 1));
        match reg.lookup("ratio").value() {
            Value::Real { min, max, .. } => assert_eq!((*min, *max), (0.0, 1.0)),
            v => panic!("unexpected value {v:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "option name must not be empty")]
    fn empty_name_is_fatal() {
        Registry::new().define(Opt::flag(""));
    }

    #[test]
    #[should_panic(expected = "invalid character")]
    fn name_with_equals_is_fatal() {
        Registry::new().define(Opt::flag("a=b"));
    }

    #[test]
    #[should_panic(expected = "invalid character")]
    fn name_with_space_is_fatal() {
        Registry::new().define(Opt::string("two words", ""));
    }

    #[test]
    #[should_panic(expected = "invalid abbreviation")]
    fn digit_abbreviation_is_fatal() {
        Registry::new().define(Opt::flag("one").short('1'));
    }

    #[test]
    #[should_panic(expected = "duplicate option name")]
    fn duplicate_name_is_fatal() {
        let mut reg = sample();
        reg.define(Opt::integer("count", 0));
    }

    #[test]
    #[should_panic(expected = "duplicate abbreviation -v")]
    fn duplicate_abbreviation_is_fatal() {
        let mut reg = sample();
        reg.define(Opt::flag("version").short('v'));
    }

    #[test]
    #[should_panic(expected = "registry is full")]
    fn capacity_is_fatal() {
        let mut reg = Registry::with_limits(Limits {
            max_options: 2,
            max_args: 4,
        });
        reg.define(Opt::flag("a"));
        reg.define(Opt::flag("b"));
        reg.define(Opt::flag("c"));
    }

    #[test]
    #[should_panic(expected = "too many positional arguments")]
    fn positional_capacity_is_fatal() {
        let mut reg = Registry::with_limits(Limits {
            max_options: 2,
            max_args: 1,
        });
        reg.push_arg("a");
        reg.push_arg("b");
    }

    #[test]
    #[should_panic(expected = "is outside the range")]
    fn default_outside_range_is_fatal() {
        Registry::new().define(Opt::integer("count", 20).range(0, 10));
    }

    #[test]
    #[should_panic(expected = "minimum 10 exceeds maximum 0")]
    fn inverted_range_is_fatal() {
        Registry::new().define(Opt::integer("count", 5).range(10, 0));
    }

    #[test]
    #[should_panic(expected = "cannot take a range")]
    fn range_on_string_is_fatal() {
        Registry::new().define(Opt::string("name", "").range(0, 1));
    }

    #[test]
    #[should_panic(expected = "needs integer bounds")]
    fn real_bounds_on_integer_is_fatal() {
        Registry::new().define(Opt::integer("count", 0).range(0.0, 1.5));
    }

    #[test]
    #[should_panic(expected = "cannot be required")]
    fn required_flag_is_fatal() {
        Registry::new().define(Opt::flag("verbose").required());
    }

    #[test]
    #[should_panic(expected = "no option named --missing")]
    fn unknown_query_is_fatal() {
        sample().get_integer("missing");
    }

    #[test]
    #[should_panic(expected = "is a string option, queried as integer")]
    fn wrong_kind_query_is_fatal() {
        sample().get_integer("name");
    }

    #[test]
    #[should_panic(expected = "queried as string")]
    fn string_query_on_flag_is_fatal() {
        sample().get_string("verbose");
    }
}
