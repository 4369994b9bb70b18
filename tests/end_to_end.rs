//! End-to-end runs through the public API.

use u_powersim::config::SimulationConfig;
use u_powersim::models::{Task, TaskCategory};
use u_powersim::report::{summary_csv, task_csv, SUMMARY_HEADER, TASK_HEADER};
use u_powersim::scheduler::{Policy, RoundRobinScheduler, Scheduler, SchedulerKind};
use u_powersim::simulation::{RunKpi, SimulationEngine, SimulationStats};
use u_powersim::workload::TaskGenerator;

const MAX_TICKS: u64 = 50_000;

fn workload() -> Vec<Task> {
    TaskGenerator::new(42).generate(50, 50, 500)
}

fn run_policy(kind: SchedulerKind, tasks: &[Task]) -> SimulationStats {
    SimulationEngine::new(Policy::build(kind, 10, true)).run(tasks, MAX_TICKS)
}

#[test]
fn test_all_policies_on_generated_workload() {
    let tasks = workload();
    for kind in SchedulerKind::ALL {
        let mut engine = SimulationEngine::new(Policy::build(kind, 10, true));
        let stats = engine.run(&tasks, MAX_TICKS);

        assert_eq!(stats.total_tasks, 50);
        assert!(stats.completed_tasks.len() <= 50, "{kind}");
        assert!(stats.total_execution_time_ticks <= MAX_TICKS, "{kind}");
        assert!(stats.total_energy_joules > 0.0, "{kind}");
        assert!(stats.peak_temperature_celsius >= 25.0, "{kind}");

        for done in &stats.completed_tasks {
            let start = done.start_tick.expect("completed task has a start tick");
            let end = done.end_tick.expect("completed task has an end tick");
            assert!(end - start >= done.duration as u64);
            assert_eq!(done.scheduler_name, stats.scheduler_name);
        }
    }
}

#[test]
fn test_total_work_fits_and_everything_completes() {
    // 50 tasks of at most 500 ticks always fit in 50000 ticks.
    let tasks = workload();
    let total_work: u64 = tasks.iter().map(|t| t.duration() as u64).sum();
    for kind in SchedulerKind::ALL {
        let stats = run_policy(kind, &tasks);
        assert_eq!(stats.completed_tasks.len(), 50, "{kind}");
        assert_eq!(stats.total_execution_time_ticks - stats.idle_ticks, total_work, "{kind}");
    }
}

#[test]
fn test_reset_then_rerun_is_bit_identical() {
    let tasks = workload();
    for kind in SchedulerKind::ALL {
        let mut engine = SimulationEngine::new(Policy::build(kind, 10, true));
        let first = engine.run(&tasks, MAX_TICKS);
        engine.reset();
        let second = engine.run(&tasks, MAX_TICKS);

        assert_eq!(first, second, "{kind}");
        assert_eq!(
            first.total_energy_joules.to_bits(),
            second.total_energy_joules.to_bits()
        );
    }
}

#[test]
fn test_fresh_engines_agree() {
    let tasks = workload();
    let a = run_policy(SchedulerKind::Dvfs, &tasks);
    let b = run_policy(SchedulerKind::Dvfs, &tasks);
    assert_eq!(a, b);
}

#[test]
fn test_round_robin_lone_task_turnaround() {
    let tasks = vec![Task::new(1, 25, TaskCategory::CpuBound)];
    let stats = SimulationEngine::new(RoundRobinScheduler::new(10)).run(&tasks, MAX_TICKS);
    assert_eq!(stats.completed_tasks.len(), 1);
    assert_eq!(stats.completed_tasks[0].turnaround(), Some(25));
}

#[test]
fn test_fcfs_same_arrival_starts_in_id_order() {
    let tasks: Vec<Task> = (1..=3)
        .map(|id| Task::new(id, 40, TaskCategory::MemoryHeavy))
        .collect();
    let stats = run_policy(SchedulerKind::Fcfs, &tasks);

    let mut by_id = stats.completed_tasks.clone();
    by_id.sort_by_key(|t| t.id);
    let starts: Vec<_> = by_id.iter().map(|t| t.start_tick.unwrap()).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_priority_preemption_through_engine() {
    let mut engine = SimulationEngine::new(Policy::build(SchedulerKind::Priority, 10, true));
    engine.load(&[Task::new(1, 20, TaskCategory::CpuBound).with_priority(2)], MAX_TICKS);
    for _ in 0..5 {
        engine.step();
    }
    engine
        .scheduler_mut()
        .submit(Task::new(2, 10, TaskCategory::CpuBound).with_priority(9));
    assert_eq!(engine.scheduler_mut().select_for_tick(), Some(2));

    while engine.step().is_some() {}
    let order: Vec<_> = engine.completed_tasks().iter().map(|t| t.id()).collect();
    assert_eq!(order, vec![2, 1]);
}

#[test]
fn test_dvfs_saves_energy_on_io_bound_work() {
    // IO-bound work at 0.8 GHz draws less than at the fixed 1.0 GHz.
    let tasks: Vec<Task> = (0..3).map(|id| Task::new(id, 200, TaskCategory::IoBound)).collect();
    let fcfs = run_policy(SchedulerKind::Fcfs, &tasks);
    let dvfs = run_policy(SchedulerKind::Dvfs, &tasks);
    assert!(dvfs.total_energy_joules < fcfs.total_energy_joules);
}

#[test]
fn test_csv_contracts() {
    let config = SimulationConfig {
        compare: true,
        num_tasks: 10,
        ..Default::default()
    };
    let tasks = config.generate_tasks();
    let results: Vec<_> = config
        .policies()
        .into_iter()
        .map(|k| config.engine(k).run(&tasks, config.simulation_duration))
        .collect();

    let summary = summary_csv(&results);
    let lines: Vec<_> = summary.lines().collect();
    assert_eq!(lines[0], SUMMARY_HEADER);
    assert_eq!(lines.len(), 5);
    for line in &lines[1..] {
        let cols: Vec<_> = line.split(',').collect();
        assert_eq!(cols.len(), 7);
        assert_eq!(cols[4].split('.').nth(1).map(str::len), Some(6));
        assert_eq!(cols[5].split('.').nth(1).map(str::len), Some(3));
        assert_eq!(cols[6].split('.').nth(1).map(str::len), Some(2));
    }
    let names: Vec<_> = lines[1..].iter().map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(names, vec!["Round-Robin", "Priority-Based", "FCFS", "DVFS-Aware"]);

    let per_task = task_csv(&results[0]);
    let rows: Vec<_> = per_task.lines().collect();
    assert_eq!(rows[0], TASK_HEADER);
    assert_eq!(rows.len(), results[0].completed_tasks.len() + 1);
    for row in &rows[1..] {
        let cols: Vec<i64> = row
            .split(',')
            .enumerate()
            .filter(|(i, _)| ![4, 5].contains(i))
            .map(|(_, c)| c.parse().unwrap())
            .collect();
        assert_eq!(cols[4], cols[2] - cols[1]);
    }
}

#[test]
fn test_kpis_over_comparison() {
    let tasks = workload();
    let kpis: Vec<RunKpi> = SchedulerKind::ALL
        .iter()
        .map(|&k| RunKpi::calculate(&run_policy(k, &tasks)))
        .collect();
    for kpi in &kpis {
        assert!((kpi.completion_rate - 1.0).abs() < 1e-12);
        assert!(kpi.utilization > 0.5 && kpi.utilization <= 1.0);
    }
    assert!(RunKpi::most_efficient(&kpis).is_some());
}

#[test]
fn test_duplicate_ids_do_not_depress_completion_rate() {
    let tasks = vec![
        Task::new(1, 5, TaskCategory::CpuBound),
        Task::new(1, 5, TaskCategory::CpuBound),
    ];
    for kind in SchedulerKind::ALL {
        let stats = run_policy(kind, &tasks);
        assert_eq!(stats.total_tasks, 1, "{kind}");
        assert_eq!(stats.completed_tasks.len(), 1, "{kind}");
        let kpi = RunKpi::calculate(&stats);
        assert!((kpi.completion_rate - 1.0).abs() < 1e-12, "{kind}");
    }
}
