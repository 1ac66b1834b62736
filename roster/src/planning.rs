use crate::constraints::Constraints;
use crate::days::Day;
use crate::distributions::{Distributions, EmployeeHours};
use crate::employee::EmployeeId;
use crate::error::RosterError;
use crate::periods::Period;
use crate::shifts::{Shift, ShiftRange, Slot};

/// Declarative input for one roster: horizon, periods, coverage, contract
/// hours, and the constraint/distribution sets to install.
///
/// Owns its [`Constraints`] and [`Distributions`]; both are seeded with the
/// planning's employee ids respectively contract hours as defaults.
#[derive(Debug, Clone)]
pub struct Planning {
    pub id: u32,
    first_day: Day,
    last_day: Day,
    periods: Vec<Period>,
    shift_duration: u32,
    employees_per_shift: u32,
    employee_hours: EmployeeHours,
    pub constraints: Constraints,
    pub distributions: Distributions,
}

impl Planning {
    pub fn new(
        id: u32,
        first_day: Day,
        last_day: Day,
        periods: Vec<Period>,
        shift_duration: u32,
        employees_per_shift: u32,
        employee_hours: EmployeeHours,
    ) -> Result<Self, RosterError> {
        if last_day < first_day {
            return Err(RosterError::ReversedHorizon {
                first: first_day.date(),
                last: last_day.date(),
            });
        }
        let mut periods = periods;
        periods.sort_unstable();
        periods.dedup();
        let family = match periods.first() {
            Some(period) => period.family(),
            None => return Err(RosterError::NoPeriods),
        };
        if periods.iter().any(|period| period.family() != family) {
            return Err(RosterError::MixedPeriodFamilies);
        }
        if employees_per_shift == 0 {
            return Err(RosterError::NoCoverage);
        }

        let employee_ids: Vec<EmployeeId> = employee_hours.keys().copied().collect();
        let constraints = Constraints::new(id, employee_ids);
        let distributions = Distributions::new(id, employee_hours.clone());
        Ok(Self {
            id,
            first_day,
            last_day,
            periods,
            shift_duration,
            employees_per_shift,
            employee_hours,
            constraints,
            distributions,
        })
    }

    pub fn first_day(&self) -> Day {
        self.first_day
    }

    pub fn last_day(&self) -> Day {
        self.last_day
    }

    /// Periods of the horizon, sorted and deduplicated.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn shift_duration(&self) -> u32 {
        self.shift_duration
    }

    pub fn employees_per_shift(&self) -> u32 {
        self.employees_per_shift
    }

    pub fn employee_hours(&self) -> &EmployeeHours {
        &self.employee_hours
    }

    /// Employee ids in ascending order.
    pub fn employee_ids(&self) -> Vec<EmployeeId> {
        self.employee_hours.keys().copied().collect()
    }

    pub fn first_shift(&self) -> Shift {
        Shift::with_duration(self.periods[0], self.first_day, self.shift_duration)
    }

    pub fn last_shift(&self) -> Shift {
        Shift::with_duration(
            self.periods[self.periods.len() - 1],
            self.last_day,
            self.shift_duration,
        )
    }

    /// Every shift of the horizon, ascending by `(day, period)`.
    pub fn shifts(&self) -> ShiftRange {
        ShiftRange::new_unchecked(self.first_shift(), self.last_shift(), &self.periods, true)
    }

    /// One demanded slot per shift.
    pub fn slots(&self) -> Vec<Slot> {
        self.shifts()
            .map(|shift| {
                Slot::new(
                    Shift::with_duration(shift.period, shift.day, self.shift_duration),
                    self.employees_per_shift,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::Planning;
    use crate::days::Day;
    use crate::distributions::EmployeeHours;
    use crate::employee::EmployeeId;
    use crate::error::RosterError;
    use crate::periods::Period;

    fn day(month: u32, day_of_month: u32) -> Day {
        Day::new(NaiveDate::from_ymd_opt(2002, month, day_of_month).unwrap())
    }

    fn hours(n: i64) -> EmployeeHours {
        (0..n).map(|id| (EmployeeId(id), 36)).collect()
    }

    fn week_planning() -> Planning {
        Planning::new(
            1,
            day(2, 4),
            day(2, 10),
            vec![Period::Day, Period::Evening],
            8,
            1,
            hours(10),
        )
        .unwrap()
    }

    #[test]
    fn enumerates_slots_in_calendar_order() {
        let planning = week_planning();
        let slots = planning.slots();

        assert_eq!(slots.len(), 14);
        assert_eq!(slots[0].shift, planning.first_shift());
        assert_eq!(slots[slots.len() - 1].shift, planning.last_shift());
        assert!(slots.windows(2).all(|pair| pair[0].shift < pair[1].shift));
        assert!(slots.iter().all(|slot| slot.n_employees == 1));
        assert!(slots.iter().all(|slot| slot.shift.duration == 8));
    }

    #[test]
    fn sorts_and_dedupes_periods() {
        let planning = Planning::new(
            1,
            day(2, 4),
            day(2, 10),
            vec![Period::Evening, Period::Day, Period::Evening],
            8,
            1,
            hours(2),
        )
        .unwrap();
        assert_eq!(planning.periods(), &[Period::Day, Period::Evening]);
    }

    #[test]
    fn seeds_the_aggregators_with_planning_defaults() {
        let planning = week_planning();
        assert_eq!(planning.constraints.employee_ids().len(), 10);
        assert_eq!(planning.distributions.employee_hours().len(), 10);
        assert_eq!(planning.constraints.id, planning.id);
    }

    #[test]
    fn rejects_reversed_horizons() {
        let err = Planning::new(
            1,
            day(2, 10),
            day(2, 4),
            vec![Period::Day],
            8,
            1,
            hours(1),
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::ReversedHorizon { .. }));
    }

    #[test]
    fn rejects_empty_periods_and_mixed_families() {
        assert_eq!(
            Planning::new(1, day(2, 4), day(2, 10), Vec::new(), 8, 1, hours(1)).unwrap_err(),
            RosterError::NoPeriods
        );
        assert_eq!(
            Planning::new(
                1,
                day(2, 4),
                day(2, 10),
                vec![Period::Day, Period::Night],
                8,
                1,
                hours(1),
            )
            .unwrap_err(),
            RosterError::MixedPeriodFamilies
        );
    }

    #[test]
    fn rejects_zero_coverage() {
        assert_eq!(
            Planning::new(1, day(2, 4), day(2, 10), vec![Period::Day], 8, 0, hours(1))
                .unwrap_err(),
            RosterError::NoCoverage
        );
    }
}
