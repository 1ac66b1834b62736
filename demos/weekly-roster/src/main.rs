use blake2::{digest::consts::U32, Blake2b, Digest};
use chrono::NaiveDate;
use clap::Parser;
use rand::prelude::SliceRandom;
use rand_chacha::rand_core::SeedableRng;

use cp_model::{ExhaustiveSolver, Solve, SolveStatus};
use roster::{
    Day, Employee, EmployeeHours, Holiday, MaxConsecutiveShifts, MaxRecurrentShifts, NShifts,
    Period, Planned, Planning, PlanningOptimization, RosterError, Shift, ShiftsPerDay, Solver,
    Specifications, WorkersPerShift,
};

type Blake2b256 = Blake2b<U32>;

/// Builds a demo roster planning, emits its constraint program and solves it
/// with the exhaustive reference solver when the search space allows.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// First day of the horizon (YYYY-MM-DD).
    #[clap(long, default_value = "2002-02-04")]
    start_date: NaiveDate,

    /// Number of days to roster.
    #[clap(long, default_value_t = 3)]
    days: u32,

    /// Number of employees on contract.
    #[clap(long, default_value_t = 3)]
    employees: i64,

    /// Employees demanded per slot.
    #[clap(long, default_value_t = 1)]
    employees_per_shift: u32,

    /// Seed for the sampled contract hours.
    #[clap(long, default_value = "42")]
    seed: String,

    /// Only print the program statistics, skip solving.
    #[clap(long)]
    no_solve: bool,

    /// Search-space cap for the exhaustive solver, in free booleans.
    #[clap(long, default_value_t = 24)]
    max_search_vars: u32,
}

fn hash_str(input: &str) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(input.as_bytes());
    let seed = hasher.finalize();
    seed.into()
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    if let Err(error) = run(args) {
        eprintln!("roster demo failed: {error}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), RosterError> {
    let mut rng = rand_chacha::ChaCha20Rng::from_seed(hash_str(&args.seed));
    let contract_options = [24u32, 32, 36];
    let employees: Vec<Employee> = (0..args.employees)
        .map(|id| {
            let hours = contract_options.choose(&mut rng).copied().unwrap_or(36);
            Employee::new(id, format!("employee-{id}"), hours)
        })
        .collect();
    let employee_hours: EmployeeHours = employees
        .iter()
        .map(|employee| (employee.id, employee.contract_hours))
        .collect();

    let first_day = Day::new(args.start_date);
    let last_day = Day::new(args.start_date + chrono::Duration::days(i64::from(args.days) - 1));

    let mut planning = Planning::new(
        0,
        first_day,
        last_day,
        vec![Period::Day, Period::Evening],
        8,
        args.employees_per_shift,
        employee_hours,
    )?;
    planning.constraints.add(WorkersPerShift::default(), None);
    planning.constraints.add(ShiftsPerDay::default(), None);
    planning
        .constraints
        .add(MaxConsecutiveShifts::default(), None);
    planning
        .constraints
        .add(MaxRecurrentShifts::default(), None);
    planning.distributions.add(NShifts::new(1), None);

    // The first employee opens on leave; their holiday becomes a blocked
    // specific-shifts constraint.
    if let Some(first) = employees.first() {
        let mut specifications = Specifications::new(first.id);
        specifications.add(Holiday::new(
            Shift::new(Period::Day, first_day),
            Shift::new(Period::Evening, first_day),
        )?);
        let blocked =
            specifications.blocked_constraint(planning.first_shift(), planning.last_shift())?;
        planning.constraints.add(blocked, None);
    }

    println!("roster demo: {first_day} .. {last_day}");
    for employee in &employees {
        println!(
            "  {employee} ({}): {} contract hours",
            employee.id, employee.contract_hours
        );
    }

    let slots = planning.slots();
    let mut solver = Solver::from_planning(&planning)?;
    let optimization = PlanningOptimization::new(planning.employee_ids());
    solver.add_optimization(&optimization, &slots)?;

    println!("\nProgram");
    println!("  - variables  : {}", solver.program.num_variables());
    println!("  - constraints: {}", solver.program.num_constraints());

    if args.no_solve {
        return Ok(());
    }

    let backend = ExhaustiveSolver::new(args.max_search_vars);
    let outcome = backend.solve(&solver.program);

    println!("\nStatistics");
    println!("  - status    : {}", outcome.status);
    println!("  - conflicts : {}", outcome.stats.num_conflicts);
    println!("  - branches  : {}", outcome.stats.num_branches);
    println!("  - wall time : {:.3} s", outcome.stats.wall_time.as_secs_f64());
    if let Some(objective) = outcome.objective_value {
        println!("  - objective : {objective}");
    }

    if outcome.status == SolveStatus::Unknown {
        println!(
            "\nsearch space too large for the demo solver; \
             rerun with fewer days/employees or raise --max-search-vars"
        );
        return Ok(());
    }

    if outcome.status.is_feasible() {
        println!("\nRoster");
        for slot in &slots {
            let mut planned = Planned::new(slot.shift);
            for &employee_id in &planning.employee_ids() {
                if let Some(&var) = solver.employee_slots.get(&(employee_id, slot.shift)) {
                    if outcome.value(var) == Some(1) {
                        planned.assign(employee_id);
                    }
                }
            }
            let marker = if planned.is_complete(slot.n_employees) {
                " "
            } else {
                "!"
            };
            println!("{marker} {planned}");
        }
    }

    Ok(())
}
