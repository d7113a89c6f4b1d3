use crate::scale;

pub fn render_index(year: i32) -> String {
    INDEX_HTML
        .replace("{{SCALE}}", &scale_json())
        .replace("{{YEAR}}", &year.to_string())
}

fn scale_json() -> String {
    serde_json::to_string(scale::buckets()).unwrap_or_else(|_| "[]".to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Cake or Rocket?</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Montserrat:wght@400;700&display=swap');

    :root {
      --ink: #222;
      --muted: #aaa;
      --cake: #e63946;
      --rocket: #457b9d;
      --line: #ccc;
      --paper: #fafafa;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      color: var(--ink);
      font-family: "Montserrat", Arial, sans-serif;
    }

    .app {
      max-width: 950px;
      margin: 0 auto;
      padding: 0 16px;
    }

    header {
      display: flex;
      align-items: center;
      gap: 12px;
      margin: 32px 0 18px;
    }

    h1 {
      margin: 0;
      font-weight: 700;
      font-size: 2em;
      letter-spacing: 1px;
    }

    header sub {
      font-size: 0.8em;
      color: var(--muted);
    }

    .lead {
      font-size: 1.2em;
      font-weight: 700;
    }

    .cake {
      color: var(--cake);
    }

    .rocket {
      color: var(--rocket);
    }

    .gradient {
      height: 6px;
      width: 100%;
      background: linear-gradient(90deg, #e63946, #f77f00, #fcbf49, #a8dadc, #2a9d8f, #378d96, #457b9d);
      border-radius: 3px;
      margin-bottom: 18px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th {
      text-align: center;
      padding: 8px;
    }

    td {
      text-align: center;
      padding: 6px;
    }

    .activity-input {
      width: 160px;
      font-size: 1em;
      padding: 10px;
      border-radius: 4px;
      border: 1px solid var(--line);
    }

    .importance-input {
      width: 64px;
      text-align: right;
      font-size: 1.2em;
      font-weight: 700;
    }

    .scale-selector {
      display: flex;
      gap: 8px;
      justify-content: center;
      flex-wrap: nowrap;
      padding-bottom: 8px;
    }

    .scale-option {
      width: 40px;
      height: 40px;
      border: none;
      border-radius: 6px;
      color: #fff;
      font-size: 24px;
      font-weight: 700;
      font-family: inherit;
      cursor: pointer;
      transition: box-shadow 0.15s;
    }

    .scale-option.selected {
      box-shadow: 0 0 0 3px var(--ink) inset;
    }

    .delete-btn {
      color: var(--cake);
      background: none;
      border: none;
      font-weight: 700;
      font-size: 1.2em;
      cursor: pointer;
    }

    .add-btn {
      margin: 16px 0 24px;
      background: var(--rocket);
      color: #fff;
      padding: 8px 16px;
      border-radius: 4px;
      border: none;
      font-size: 1.2em;
      font-weight: 700;
      cursor: pointer;
    }

    .data-actions {
      margin: 24px 0;
      display: flex;
      gap: 16px;
    }

    .data-actions button {
      padding: 8px 14px;
      font-size: 1em;
      cursor: pointer;
    }

    .chart-container {
      min-height: 320px;
    }

    .chart-container svg {
      width: 100%;
      height: auto;
      font-family: "Montserrat", Arial, sans-serif;
      font-size: 13px;
    }

    .warnings {
      color: var(--cake);
      font-weight: 700;
    }

    .warnings:empty {
      display: none;
    }

    footer {
      background: var(--paper);
      border-top: 2px solid var(--cake);
      margin-top: 40px;
      padding: 24px 16px;
      line-height: 1.6;
    }

    footer .copy {
      color: var(--muted);
      font-size: 0.95em;
    }

    @media (max-width: 700px) {
      thead {
        display: none;
      }

      tr {
        display: block;
        padding: 16px;
        border: 1px solid var(--line);
        border-radius: 8px;
        margin-bottom: 16px;
      }

      td {
        display: block;
        padding: 4px 0;
      }

      .activity-input {
        width: 100%;
        font-size: 1.2em;
      }

      .scale-option {
        width: 34px;
        height: 34px;
        font-size: 20px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>🍰🚀 Cake or Rocket?</h1>
      <sub>v0.1</sub>
    </header>
    <p class="lead"><span class="cake">🍰</span> = Consumption, <span class="rocket">🚀</span> = Investment</p>
    <p class="lead">Rate your activities on a scale from <span class="cake">🍰</span> to <span class="rocket">🚀</span> and their importance from 1 to 100.</p>
    <div class="gradient"></div>

    <table>
      <thead>
        <tr>
          <th>Activity</th>
          <th style="min-width: 280px">Scale</th>
          <th>Importance<br />(1–100)</th>
          <th></th>
        </tr>
      </thead>
      <tbody id="rows"></tbody>
    </table>
    <button class="add-btn" id="add" type="button">+ Add Activity</button>

    <div class="data-actions">
      <button id="download" type="button">⬇️ Download your Data</button>
      <button id="upload" type="button">⬆️ Upload your Data</button>
      <input id="file" type="file" accept=".yaml,.yml,text/yaml" hidden />
    </div>

    <div class="chart-container" id="chart"></div>
    <p class="lead">Weighted Mean: <span class="cake" id="mean">0.00</span></p>
    <p class="warnings" id="warnings"></p>

    <footer>
      <strong>Why “Cake or Rocket?”</strong><br />
      The app “Cake or Rocket?” was created to help people become more mindful about how they spend their time and energy, balancing instant pleasures (“cake”) with actions that invest in their future (building the “rocket” that brings you to a better distant future).<br /><br />
      <strong>What benefit to expect:</strong><br />
      Visualize your balance between instant gratification and long-term investment, gain self-awareness, and make more intentional choices. Nothing leaves this page unless you download it.<br /><br />
      <span class="copy">&copy; {{YEAR}} Cake or Rocket?</span>
    </footer>
  </main>

  <script>
    const SCALE = {{SCALE}};

    const rowsEl = document.getElementById('rows');
    const chartEl = document.getElementById('chart');
    const meanEl = document.getElementById('mean');
    const warningsEl = document.getElementById('warnings');
    const fileEl = document.getElementById('file');

    let version = -1;

    const request = async (method, url, body, contentType) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['content-type'] = contentType || 'application/json';
        options.body = contentType ? body : JSON.stringify(body);
      }
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const renderSummary = (snapshot) => {
      chartEl.innerHTML = snapshot.chart_svg;
      meanEl.textContent = snapshot.aggregation.weighted_mean.toFixed(2);
      const skipped = snapshot.aggregation.warnings;
      warningsEl.textContent = skipped.length
        ? `Ignored ${skipped.length} activit${skipped.length === 1 ? 'y' : 'ies'} with a scale outside 0–6: ` +
          skipped.map((w) => `#${w.index + 1} (${w.scale})`).join(', ')
        : '';
    };

    const scaleSelector = (index, selected) => {
      const wrap = document.createElement('div');
      wrap.className = 'scale-selector';
      SCALE.forEach((bucket) => {
        const option = document.createElement('button');
        option.type = 'button';
        option.className = 'scale-option' + (selected === bucket.index ? ' selected' : '');
        option.style.background = bucket.color;
        option.textContent = bucket.label;
        option.title = `${bucket.value}`;
        option.addEventListener('click', () => {
          edit(index, 'scale', bucket.index, true);
        });
        wrap.appendChild(option);
      });
      return wrap;
    };

    const renderRows = (activities) => {
      rowsEl.replaceChildren();
      activities.forEach((row, index) => {
        const tr = document.createElement('tr');

        const activityCell = document.createElement('td');
        const activityInput = document.createElement('input');
        activityInput.className = 'activity-input';
        activityInput.placeholder = 'Activity';
        activityInput.value = row.activity;
        activityInput.addEventListener('change', () => edit(index, 'activity', activityInput.value, false));
        activityCell.appendChild(activityInput);

        const scaleCell = document.createElement('td');
        scaleCell.appendChild(scaleSelector(index, row.scale));

        const importanceCell = document.createElement('td');
        const importanceInput = document.createElement('input');
        importanceInput.className = 'importance-input';
        importanceInput.type = 'number';
        importanceInput.min = '1';
        importanceInput.max = '100';
        importanceInput.value = row.importance === null ? '' : row.importance;
        importanceInput.addEventListener('change', () => edit(index, 'importance', importanceInput.value, false));
        importanceCell.appendChild(importanceInput);

        const deleteCell = document.createElement('td');
        const deleteBtn = document.createElement('button');
        deleteBtn.className = 'delete-btn';
        deleteBtn.type = 'button';
        deleteBtn.title = 'Delete';
        deleteBtn.textContent = '✕';
        deleteBtn.addEventListener('click', () => run(request('DELETE', `/api/activities/${index}`), true));
        deleteCell.appendChild(deleteBtn);

        tr.append(activityCell, scaleCell, importanceCell, deleteCell);
        rowsEl.appendChild(tr);
      });
    };

    const apply = (snapshot, rebuildRows) => {
      if (snapshot.version < version) {
        return;
      }
      version = snapshot.version;
      if (rebuildRows) {
        renderRows(snapshot.activities);
      }
      renderSummary(snapshot);
    };

    const run = (promise, rebuildRows) =>
      promise
        .then((snapshot) => apply(snapshot, rebuildRows))
        .catch((err) => alert(err.message));

    // Text edits keep the row DOM so focus is not lost while tabbing between fields.
    const edit = (index, field, value, rebuildRows) =>
      run(request('PATCH', `/api/activities/${index}`, { field, value }), rebuildRows);

    document.getElementById('add').addEventListener('click', () => {
      run(request('POST', '/api/activities'), true);
    });

    document.getElementById('download').addEventListener('click', () => {
      const a = document.createElement('a');
      a.href = '/api/export';
      a.download = 'activities.yaml';
      a.click();
    });

    document.getElementById('upload').addEventListener('click', () => fileEl.click());

    fileEl.addEventListener('change', (event) => {
      const file = event.target.files[0];
      if (!file) {
        return;
      }
      const reader = new FileReader();
      reader.onload = (evt) => {
        run(request('POST', '/api/import', evt.target.result, 'text/yaml'), true);
      };
      reader.readAsText(file);
      fileEl.value = '';
    });

    run(request('GET', '/api/activities'), true);
  </script>
</body>
</html>
"#;
