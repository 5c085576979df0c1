use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::{
    dataset::Dataset,
    error::MiningError,
    fp::fp_growth as mine_fp_growth,
    itemsets::{find_closed_itemsets, Apriori},
    types::FrequentItemset,
    MiningConfig,
};

type PyItemset = (Vec<String>, f64);

fn to_py_err(error: MiningError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

fn convert_itemsets(dataset: &Dataset, frequent: &[FrequentItemset]) -> Vec<PyItemset> {
    frequent
        .iter()
        .map(|f| {
            let names = dataset
                .names_of(&f.itemset)
                .into_iter()
                .map(str::to_owned)
                .collect();
            (names, f.support)
        })
        .collect()
}

fn run_apriori(
    transactions: Vec<Vec<String>>,
    min_support: f64,
) -> Result<(Dataset, Vec<FrequentItemset>), MiningError> {
    let dataset = Dataset::from_records(transactions);
    let config = MiningConfig::new(min_support)?;
    let output = Apriori::new(&config)?.run(dataset.transactions())?;
    Ok((dataset, output.frequent))
}

/// Frequent itemsets by level-wise candidate generation.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support)")]
fn apriori(transactions: Vec<Vec<String>>, min_support: f64) -> PyResult<Vec<PyItemset>> {
    let (dataset, frequent) = run_apriori(transactions, min_support).map_err(to_py_err)?;
    Ok(convert_itemsets(&dataset, &frequent))
}

/// Closed itemsets, descending support.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support)")]
fn closed_itemsets(transactions: Vec<Vec<String>>, min_support: f64) -> PyResult<Vec<PyItemset>> {
    let (dataset, frequent) = run_apriori(transactions, min_support).map_err(to_py_err)?;
    Ok(convert_itemsets(&dataset, &find_closed_itemsets(&frequent)))
}

/// Frequent itemsets by FP-Growth, descending support.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support, max_depth=None)")]
fn fp_growth(
    transactions: Vec<Vec<String>>,
    min_support: f64,
    max_depth: Option<usize>,
) -> PyResult<Vec<PyItemset>> {
    let dataset = Dataset::from_records(transactions);
    let mut config = MiningConfig::new(min_support).map_err(to_py_err)?;
    config.max_depth = max_depth;
    let output = mine_fp_growth(dataset.transactions(), &config).map_err(to_py_err)?;
    Ok(convert_itemsets(&dataset, &output.frequent_itemsets()))
}

#[pymodule]
fn freqmine(_: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(apriori, m)?)?;
    m.add_function(wrap_pyfunction!(closed_itemsets, m)?)?;
    m.add_function(wrap_pyfunction!(fp_growth, m)?)?;
    Ok(())
}
