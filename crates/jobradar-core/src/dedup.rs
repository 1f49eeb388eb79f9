use std::collections::HashSet;

use crate::models::Job;

/// Identity of a posting across providers: title followed by company,
/// compared exactly.
pub fn identity_key(job: &Job) -> String {
    format!("{}{}", job.title, job.company)
}

/// Drop every job whose identity key was already seen. First occurrence
/// wins and survivors keep their relative order.
pub fn deduplicate(jobs: Vec<Job>) -> Vec<Job> {
    let mut seen = HashSet::with_capacity(jobs.len());
    jobs.into_iter()
        .filter(|job| seen.insert(identity_key(job)))
        .collect()
}
