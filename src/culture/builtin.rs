//! Built-in culture data.

use chrono::Weekday;

use super::Culture;

impl Default for Culture {
    fn default() -> Self {
        Self::en_us()
    }
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Culture {
    /// US English culture.
    pub fn en_us() -> Self {
        Culture {
            name: "en-US".to_string(),
            decimal_separator: '.',
            group_separator: ',',
            group_sizes: vec![3],
            negative_sign: "-".to_string(),
            percent_symbol: "%".to_string(),
            permille_symbol: "‰".to_string(),
            currency_symbol: "$".to_string(),
            currency_positive_pattern: "$n".to_string(),
            currency_negative_pattern: "($n)".to_string(),
            percent_positive_pattern: "n %".to_string(),
            percent_negative_pattern: "-n %".to_string(),
            number_negative_pattern: "-n".to_string(),
            nan_symbol: "NaN".to_string(),
            positive_infinity_symbol: "Infinity".to_string(),
            negative_infinity_symbol: "-Infinity".to_string(),
            first_day_of_week: Weekday::Sun,
            day_names: names(&[
                "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
            ]),
            abbreviated_day_names: names(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            month_names: names(&[
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ]),
            abbreviated_month_names: names(&[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
        }
    }

    /// German (Germany) culture.
    pub fn de_de() -> Self {
        Culture {
            name: "de-DE".to_string(),
            decimal_separator: ',',
            group_separator: '.',
            currency_symbol: "€".to_string(),
            currency_positive_pattern: "n $".to_string(),
            currency_negative_pattern: "-n $".to_string(),
            first_day_of_week: Weekday::Mon,
            day_names: names(&[
                "Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag",
            ]),
            abbreviated_day_names: names(&["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"]),
            month_names: names(&[
                "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
                "September", "Oktober", "November", "Dezember",
            ]),
            abbreviated_month_names: names(&[
                "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
            ]),
            ..Self::en_us()
        }
    }

    /// French (France) culture. Groups with a no-break space.
    pub fn fr_fr() -> Self {
        Culture {
            name: "fr-FR".to_string(),
            decimal_separator: ',',
            group_separator: '\u{a0}',
            currency_symbol: "€".to_string(),
            currency_positive_pattern: "n $".to_string(),
            currency_negative_pattern: "-n $".to_string(),
            nan_symbol: "Non Numérique".to_string(),
            positive_infinity_symbol: "+Infini".to_string(),
            negative_infinity_symbol: "-Infini".to_string(),
            first_day_of_week: Weekday::Mon,
            day_names: names(&[
                "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
            ]),
            abbreviated_day_names: names(&["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."]),
            month_names: names(&[
                "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
                "septembre", "octobre", "novembre", "décembre",
            ]),
            abbreviated_month_names: names(&[
                "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
                "nov.", "déc.",
            ]),
            ..Self::en_us()
        }
    }

    /// English (India) culture, grouping lakhs and crores.
    pub fn en_in() -> Self {
        Culture {
            name: "en-IN".to_string(),
            group_sizes: vec![3, 2],
            currency_symbol: "₹".to_string(),
            currency_positive_pattern: "$ n".to_string(),
            currency_negative_pattern: "$ -n".to_string(),
            first_day_of_week: Weekday::Mon,
            ..Self::en_us()
        }
    }
}
