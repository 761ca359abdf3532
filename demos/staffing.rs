/*
 * Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

use time::OffsetDateTime;

use rustop::opts;

use team_flow::staffing::{roles_in_demand, Applicant, TeamNetwork, TeamRequirement};

use tracing::Level;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (args, _) = opts! {
        synopsis "Staff a small team and list the roles that are still in demand.";
        opt verbose:bool, desc:"Print the steps of the algorithms.";
    }
    .parse_or_exit();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::TRACE } else { Level::INFO })
        .init();

    let applicants = vec![
        Applicant::new("applicant-1", vec!["skill-1", "skill-2"]),
        Applicant::new("applicant-2", vec!["skill-1", "skill-2", "skill-3"]),
        Applicant::new("applicant-3", vec!["skill-2", "skill-3"]),
    ];
    let requirements = vec![
        TeamRequirement::new(1, vec!["skill-1"]),
        TeamRequirement::new(2, vec!["skill-2"]),
        TeamRequirement::new(2, vec!["skill-3"]),
    ];

    let tstart = OffsetDateTime::now_utc();
    let mut team = TeamNetwork::new(Applicant::has_skills, &applicants, &requirements)?;
    team.preflow_push()?;
    let role_assignments = team.role_assignments();
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("Flow: {}", team.flow_amount()?);

    let mut members = role_assignments.iter().collect::<Vec<_>>();
    members.sort();
    for (applicant, role) in members {
        println!("{} : {:?}", applicant.name(), role);
    }

    let tstart = OffsetDateTime::now_utc();
    let mut in_demand = roles_in_demand(&requirements, &role_assignments, Applicant::has_skills)?
        .into_iter()
        .collect::<Vec<_>>();
    let tend = OffsetDateTime::now_utc();
    in_demand.sort();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("Roles in demand: {:?}", in_demand);

    Ok(())
}
