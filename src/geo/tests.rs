#[cfg(test)]
mod position_tests {
    use crate::geo::Position;

    /// Test that coordinate validation works correctly at the API boundary.
    #[test]
    fn test_coordinate_validation() {
        assert!(Position::new(40.7128, -74.0060).is_ok());
        assert!(Position::new(90.0, 180.0).is_ok());
        assert!(Position::new(-90.0, -180.0).is_ok());

        assert!(Position::new(91.0, 0.0).is_err());
        assert!(Position::new(-91.0, 0.0).is_err());
        assert!(Position::new(0.0, 181.0).is_err());
        assert!(Position::new(0.0, -360.0).is_err());
        assert!(Position::new(f64::NAN, 0.0).is_err());
        assert!(Position::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_coordinate_fallback_format() {
        let position = Position::new(51.5, -0.12).unwrap();
        assert_eq!(position.format_coordinates(), "51.50°, -0.12°");

        let position = Position::new(-22.90685, -43.17290).unwrap();
        assert_eq!(position.format_coordinates(), "-22.91°, -43.17°");

        // Exact binary ties round away from zero
        let position = Position::new(51.125, -0.375).unwrap();
        assert_eq!(position.format_coordinates(), "51.13°, -0.38°");
    }

    #[test]
    fn test_serializes_validated_fields() {
        let position = Position::new(-33.8688, 151.2093).unwrap();
        assert_eq!(
            serde_json::to_value(position).unwrap(),
            serde_json::json!({ "latitude": -33.8688, "longitude": 151.2093 })
        );
    }

    #[test]
    fn test_display_uses_hemispheres() {
        let position = Position::new(-33.8688, 151.2093).unwrap();
        assert_eq!(position.to_string(), "33.8688°S, 151.2093°E");
    }

    #[test]
    fn test_parse_pair() {
        let position = Position::parse_pair("48.8566, 2.3522").unwrap();
        assert_eq!(position.latitude(), 48.8566);
        assert_eq!(position.longitude(), 2.3522);

        assert!(Position::parse_pair("48.8566").is_err());
        assert!(Position::parse_pair("north,south").is_err());
        assert!(Position::parse_pair("95,0").is_err());
    }
}

#[cfg(test)]
mod solar_tests {
    use crate::geo::Position;
    use crate::geo::solar::*;
    use chrono::{Duration, NaiveDate, TimeZone, Timelike, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Test that timezone detection works for real-world coordinates.
    #[test]
    fn test_timezone_detection() {
        use chrono_tz::{America, Asia, Europe};

        assert_eq!(
            determine_timezone_from_coordinates(40.7128, -74.0060),
            America::New_York
        );
        assert_eq!(
            determine_timezone_from_coordinates(51.5074, -0.1278),
            Europe::London
        );
        assert_eq!(
            determine_timezone_from_coordinates(35.6762, 139.6503),
            Asia::Tokyo
        );
    }

    #[test]
    fn test_london_midsummer() {
        let london = Position::new(51.5074, -0.1278).unwrap();
        let times = AstronomicalCalculator.solar_times(date(2024, 6, 21), &london);

        // Roughly 03:43 and 20:21 UTC
        assert_eq!(times.sunrise.hour(), 3);
        assert!(times.sunset.hour() == 20);
        assert!(times.day_length() > Duration::hours(16));
    }

    #[test]
    fn test_sunrise_precedes_sunset_worldwide() {
        let places = [
            (1.3521, 103.8198),   // Singapore
            (48.8566, 2.3522),    // Paris
            (-33.9249, 18.4241),  // Cape Town
            (-33.8688, 151.2093), // Sydney
            (34.0522, -118.2437), // Los Angeles
        ];
        for (lat, lon) in places {
            let position = Position::new(lat, lon).unwrap();
            for day in [date(2024, 3, 20), date(2024, 6, 21), date(2024, 12, 21)] {
                let times = AstronomicalCalculator.solar_times(day, &position);
                assert!(
                    times.sunrise < times.sunset,
                    "sunrise after sunset at ({lat}, {lon}) on {day}"
                );
                assert!(times.day_length() < Duration::hours(24));
            }
        }
    }

    #[test]
    fn test_equatorial_local_times() {
        let singapore = Position::new(1.3521, 103.8198).unwrap();
        let tz = AstronomicalCalculator.timezone(&singapore);
        let times = AstronomicalCalculator.solar_times(date(2024, 6, 21), &singapore);

        let sunrise = times.sunrise.with_timezone(&tz);
        let sunset = times.sunset.with_timezone(&tz);
        assert!((6..=8).contains(&sunrise.hour()));
        assert!((18..=20).contains(&sunset.hour()));
        assert_eq!(sunrise.date_naive(), date(2024, 6, 21));
    }

    #[test]
    fn test_polar_latitudes_are_clamped() {
        assert_eq!(clamp_latitude(80.0), 65.0);
        assert_eq!(clamp_latitude(-89.0), -65.0);
        assert_eq!(clamp_latitude(45.0), 45.0);

        // Midsummer in Svalbard has no real sunset; the clamped latitude does
        let svalbard = Position::new(78.2232, 15.6267).unwrap();
        let times = AstronomicalCalculator.solar_times(date(2024, 6, 21), &svalbard);
        assert!(times.sunrise < times.sunset);
    }

    #[test]
    fn test_calendar_date_follows_mean_solar_time() {
        // 2024-06-21 23:30 UTC is already the 22nd in Tokyo and still the 21st in New York
        let instant = Utc.with_ymd_and_hms(2024, 6, 21, 23, 30, 0).unwrap();
        let tokyo = Position::new(35.6762, 139.6503).unwrap();
        let new_york = Position::new(40.7128, -74.0060).unwrap();

        assert_eq!(
            AstronomicalCalculator.calendar_date(instant, &tokyo),
            date(2024, 6, 22)
        );
        assert_eq!(
            AstronomicalCalculator.calendar_date(instant, &new_york),
            date(2024, 6, 21)
        );
    }

    #[test]
    fn test_calendar_date_ignores_civil_date_line_shift() {
        // Noon on the 15th in Apia (UTC+13) is late morning of the 14th in mean solar time
        let apia = Position::new(-13.83, -171.76).unwrap();
        let local_noon = Utc.with_ymd_and_hms(2024, 6, 14, 23, 0, 0).unwrap();

        assert_eq!(
            AstronomicalCalculator
                .timezone(&apia)
                .from_utc_datetime(&local_noon.naive_utc())
                .date_naive(),
            date(2024, 6, 15)
        );
        assert_eq!(
            AstronomicalCalculator.calendar_date(local_noon, &apia),
            date(2024, 6, 14)
        );

        let times = AstronomicalCalculator.solar_times(date(2024, 6, 14), &apia);
        assert!(times.contains(local_noon));
    }

    #[test]
    fn test_mean_solar_offset() {
        assert_eq!(mean_solar_offset(0.0), Duration::zero());
        assert_eq!(mean_solar_offset(15.0), Duration::hours(1));
        assert_eq!(mean_solar_offset(-171.76), Duration::seconds(-41_222));
    }

    #[test]
    fn test_contains_is_half_open() {
        let sunrise = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let sunset = Utc.with_ymd_and_hms(2024, 1, 1, 16, 0, 0).unwrap();
        let times = SolarTimes::new(sunrise, sunset);

        assert!(times.contains(sunrise));
        assert!(times.contains(sunset - Duration::seconds(1)));
        assert!(!times.contains(sunset));
        assert!(!times.contains(sunrise - Duration::seconds(1)));
    }
}
