use spawn_core::features::{Feature, DEFAULT_IMPLICATIONS};

use crate::output;

/// Print the feature registry in registry order.
pub fn run() {
    output::print_header("spawn features");

    for feature in Feature::ALL {
        output::print_feature(feature.as_str(), feature.description());
        let aliases = &feature.aliases()[1..];
        if !aliases.is_empty() {
            output::print_key_value("aliases", &aliases.join(", "));
        }
        if let Some((_, implied)) = DEFAULT_IMPLICATIONS.iter().find(|(f, _)| *f == feature) {
            let names: Vec<_> = implied.iter().map(|f| f.as_str()).collect();
            output::print_key_value("disabling also disables", &names.join(", "));
        }
    }
    println!();
}
