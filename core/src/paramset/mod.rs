//! Parameter Sets

use crate::pbrt::*;
use std::collections::HashMap;
use std::fmt;

mod paramset_item;

// Re-export
pub use paramset_item::*;

/// A hashmap of parameter sets stored by name.
pub type ParamSetMap<T> = HashMap<String, ParamSetItem<T>>;

/// Stores named configuration values of different types in hashmaps.
#[derive(Clone, Default)]
pub struct ParamSet {
    pub bools: ParamSetMap<bool>,
    pub ints: ParamSetMap<Int>,
    pub floats: ParamSetMap<Float>,
    pub strings: ParamSetMap<String>,
}

/// Define a macro that can be used to generate a function for adding/replacing
/// parameter set item.
macro_rules! paramset_add {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&mut self, name: &str, values: &[$t]) {
            self.$paramset
                .insert(String::from(name), ParamSetItem::new(values.to_vec()));
        }
    };
}

/// Define a macro that can be used to generate a function for removing
/// parameter set item.
macro_rules! paramset_erase {
    ($func: ident, $paramset: ident) => {
        pub fn $func(&mut self, name: &str) -> bool {
            self.$paramset.remove(name).is_some()
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a single item.
macro_rules! paramset_find_one {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str, default: $t) -> $t {
            match self.$paramset.get(name) {
                Some(param) if param.values.len() == 1 => {
                    param.looked_up.set(true);
                    param.values[0].clone()
                }
                _ => default,
            }
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a list.
macro_rules! paramset_find {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str) -> Vec<$t> {
            match self.$paramset.get(name) {
                Some(param) => {
                    param.looked_up.set(true);
                    param.values.clone()
                }
                None => vec![],
            }
        }
    };
}

/// Define a macro that can be used to print parameter set items.
macro_rules! display_param {
    ($params: expr, $param_type: literal, $formatter: expr) => {
        let mut names: Vec<&String> = $params.keys().collect();
        names.sort();
        for name in names {
            writeln!($formatter, "\"{} {}\" {}", $param_type, name, $params[name])?;
        }
    };
}

/// Define a macro that warns about parameter set items nobody read.
macro_rules! report_unused_params {
    ($params: expr, $param_type: literal) => {
        for (name, param) in $params.iter() {
            if !param.looked_up.get() {
                warn!("Parameter \"{} {}\" not used", $param_type, name);
            }
        }
    };
}

impl ParamSet {
    /// Returns a new `ParamSet`.
    pub fn new() -> Self {
        Self::default()
    }

    paramset_erase!(erase_int, ints);
    paramset_find_one!(find_one_int, Int, ints);
    paramset_find!(find_int, Int, ints);
    paramset_add!(add_int, Int, ints);

    paramset_erase!(erase_bool, bools);
    paramset_find_one!(find_one_bool, bool, bools);
    paramset_find!(find_bool, bool, bools);
    paramset_add!(add_bool, bool, bools);

    paramset_erase!(erase_float, floats);
    paramset_find_one!(find_one_float, Float, floats);
    paramset_find!(find_float, Float, floats);
    paramset_add!(add_float, Float, floats);

    paramset_erase!(erase_string, strings);
    paramset_find_one!(find_one_string, String, strings);
    paramset_find!(find_string, String, strings);
    paramset_add!(add_string, String, strings);

    /// Finds a single non-negative integer used as a count.
    ///
    /// * `name`    - Parameter name.
    /// * `default` - Value used when the parameter is absent.
    pub fn find_one_count(&self, name: &str, default: u64) -> Result<u64, String> {
        match self.ints.get(name) {
            Some(param) if param.values.len() == 1 => {
                param.looked_up.set(true);
                let value = param.values[0];
                u64::try_from(value).map_err(|_| format!("Parameter '{}' must not be negative, got {}", name, value))
            }
            _ => Ok(default),
        }
    }

    /// Logs a warning for each parameter that was never read.
    pub fn report_unused(&self) {
        report_unused_params!(self.bools, "bool");
        report_unused_params!(self.ints, "integer");
        report_unused_params!(self.floats, "float");
        report_unused_params!(self.strings, "string");
    }

    /// Returns the names of the parameters that were never read.
    pub fn unused(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        names.extend(self.bools.iter().filter(|(_, p)| !p.looked_up.get()).map(|(n, _)| n.clone()));
        names.extend(self.ints.iter().filter(|(_, p)| !p.looked_up.get()).map(|(n, _)| n.clone()));
        names.extend(self.floats.iter().filter(|(_, p)| !p.looked_up.get()).map(|(n, _)| n.clone()));
        names.extend(self.strings.iter().filter(|(_, p)| !p.looked_up.get()).map(|(n, _)| n.clone()));
        names.sort();
        names
    }
}

impl fmt::Display for ParamSet {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_param!(self.bools, "bool", f);
        display_param!(self.ints, "integer", f);
        display_param!(self.floats, "float", f);
        display_param!(self.strings, "string", f);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_one_uses_default_when_missing() {
        let params = ParamSet::new();
        assert_eq!(params.find_one_int("taa_samples", 16), 16);
        assert!(!params.find_one_bool("dof_jitter", false));
    }

    #[test]
    fn find_one_ignores_lists() {
        let mut params = ParamSet::new();
        params.add_int("taa_samples", &[1, 2]);
        assert_eq!(params.find_one_int("taa_samples", 16), 16);
        assert_eq!(params.find_int("taa_samples"), vec![1, 2]);
    }

    #[test]
    fn add_replace_and_erase() {
        let mut params = ParamSet::new();
        params.add_float("clamp_surface_direct", &[2.0]);
        params.add_float("clamp_surface_direct", &[3.0]);
        assert_eq!(params.find_one_float("clamp_surface_direct", 0.0), 3.0);
        assert!(params.erase_float("clamp_surface_direct"));
        assert!(!params.erase_float("clamp_surface_direct"));
    }

    #[test]
    fn negative_count_is_an_error() {
        let mut params = ParamSet::new();
        params.add_int("taa_samples", &[-4]);
        assert!(params.find_one_count("taa_samples", 16).is_err());
        params.add_int("taa_samples", &[4]);
        assert_eq!(params.find_one_count("taa_samples", 16), Ok(4));
    }

    #[test]
    fn count_default_is_not_truncated() {
        let params = ParamSet::new();
        let large = u64::from(u32::MAX) + 7;
        assert_eq!(params.find_one_count("taa_samples", large), Ok(large));
        assert_eq!(params.find_one_count("taa_samples", 0xFFFFFF), Ok(0xFFFFFF));
    }

    #[test]
    fn count_ignores_lists() {
        let mut params = ParamSet::new();
        params.add_int("taa_samples", &[1, 2]);
        assert_eq!(params.find_one_count("taa_samples", 16), Ok(16));
        assert_eq!(params.unused(), vec![String::from("taa_samples")]);
    }

    #[test]
    fn tracks_unused_parameters() {
        let mut params = ParamSet::new();
        params.add_bool("motion_blur", &[true]);
        params.add_string("typo", &[String::from("x")]);
        assert!(params.find_one_bool("motion_blur", false));
        assert_eq!(params.unused(), vec![String::from("typo")]);
        params.report_unused();
    }

    #[test]
    fn display_lists_values() {
        let mut params = ParamSet::new();
        params.add_int("taa_samples", &[8]);
        assert_eq!(format!("{}", params), "\"integer taa_samples\" [8]\n");
    }
}
