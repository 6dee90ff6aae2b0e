quantity!(
    /// Maloti per kilowatt-hour.
    KilowattHourRate, prefix: "M", suffix: "/kWh"
);
