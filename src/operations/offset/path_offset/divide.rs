use crate::geometry::Primitive;
use crate::math::{length, Point2};

/// Partitions a chain at its self-crossings.
///
/// Walking the chain, a segment that starts at a crossing opens a loop that
/// runs until a segment ends back at the same crossing. The loop is divided
/// on its own, and whatever follows it is divided and appended to the run
/// the loop interrupted. The first list of the result is the run that holds
/// the chain's first segment.
#[must_use]
pub fn divide(segments: &[Primitive], crossings: &[Point2], tolerance: f64) -> Vec<Vec<Primitive>> {
    let Some((first, rest)) = segments.split_first() else {
        return vec![Vec::new()];
    };
    if rest.is_empty() {
        return vec![segments.to_vec()];
    }

    let mut list: Vec<Vec<Primitive>> = vec![vec![*first]];
    let mut looped: Vec<Primitive> = Vec::new();
    let mut remainder: &[Primitive] = &[];
    let mut open: Option<Point2> = None;

    for (i, seg) in rest.iter().enumerate() {
        match open {
            None => {
                if let Some(crossing) = find_near(crossings, &seg.p1(), tolerance) {
                    open = Some(crossing);
                    looped.push(*seg);
                } else if let Some(run) = list.last_mut() {
                    run.push(*seg);
                }
            }
            Some(crossing) => {
                looped.push(*seg);
                if length(&crossing, &seg.p2()) < tolerance {
                    remainder = &rest[i + 1..];
                    break;
                }
            }
        }
    }

    if !remainder.is_empty() {
        let mut divided = divide(remainder, crossings, tolerance).into_iter();
        if let (Some(run), Some(head)) = (list.last_mut(), divided.next()) {
            run.extend(head);
        }
        list.extend(divided);
    }
    if !looped.is_empty() {
        list.extend(divide(&looped, crossings, tolerance));
    }
    list
}

fn find_near(points: &[Point2], p: &Point2, tolerance: f64) -> Option<Point2> {
    points.iter().find(|q| length(q, p) < tolerance).copied()
}

/// Reorders segments so that each one is followed by a segment starting
/// where it ends, then cuts the sequence into maximal connected runs.
#[must_use]
pub fn group(segments: Vec<Primitive>, tolerance: f64) -> Vec<Vec<Primitive>> {
    if segments.len() < 2 {
        return vec![segments];
    }
    let mut array = segments;
    for i in 0..array.len() - 1 {
        let end = array[i].p2();
        if let Some(offset) = array[i + 1..]
            .iter()
            .position(|seg| length(&end, &seg.p1()) < tolerance)
        {
            let seg = array.remove(i + 1 + offset);
            array.insert(i + 1, seg);
        }
    }

    let mut results: Vec<Vec<Primitive>> = Vec::new();
    let mut run: Vec<Primitive> = Vec::new();
    for seg in array {
        if let Some(prev) = run.last() {
            if length(&prev.p2(), &seg.p1()) >= tolerance {
                results.push(std::mem::take(&mut run));
            }
        }
        run.push(seg);
    }
    results.push(run);
    results
}
